//! Parameters describing a simulated scene

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The equipment making up a simulated vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub joints: Vec<SimJointParams>,
    pub seats: Vec<SimSeatParams>,
}

/// A simulated joint.
#[derive(Debug, Clone, Deserialize)]
pub struct SimJointParams {
    pub name: String,
    pub kind: JointKind,

    /// Lower limit of travel.
    ///
    /// Units: radians for rotational joints, meters for linear joints
    pub low: f64,

    /// Upper limit of travel.
    ///
    /// Units: radians for rotational joints, meters for linear joints
    pub high: f64,

    /// Starting position.
    ///
    /// Units: radians for rotational joints, meters for linear joints
    pub position: f64,

    /// Persisted configuration text the joint starts with.
    #[serde(default)]
    pub custom_data: String,
}

/// A simulated control seat.
#[derive(Debug, Clone, Deserialize)]
pub struct SimSeatParams {
    pub name: String,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointKind {
    Rotational,
    Linear,
}

use thiserror::Error;

/// Top-level error type for plan resolution.
#[derive(Debug, Error)]
pub enum FloorScriptError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    SubSpace(#[from] SubSpaceError),

    #[error(transparent)]
    WallReference(#[from] WallReferenceError),
}

/// Errors in the configuration tree that survive deserialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid FloorScript config: {0}")]
    Invalid(String),

    #[error("invalid dimension {input:?}: {reason}")]
    InvalidDimension { input: String, reason: String },

    #[error("invalid opening on {wall}: {reason}")]
    InvalidOpening { wall: String, reason: String },
}

/// Errors raised while placing rooms on the plan.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("duplicate room id '{0}'")]
    DuplicateRoom(String),

    #[error("room '{room}' is adjacent to unknown room '{target}' (rooms must be placed before they are referenced)")]
    UnknownAdjacentRoom { room: String, target: String },
}

/// Errors raised while carving enclosures and extensions.
#[derive(Debug, Error)]
pub enum SubSpaceError {
    #[error("Duplicate sub-space id '{id}' in room '{room}'")]
    DuplicateId { id: String, room: String },

    #[error("{kind} '{id}' exceeds the bounds of room '{room}'")]
    ExceedsParent {
        kind: &'static str,
        id: String,
        room: String,
    },

    #[error("sub-spaces '{first}' and '{second}' overlap in room '{room}'")]
    Overlap {
        first: String,
        second: String,
        room: String,
    },

    #[error("enclosure '{id}' at the {anchor} cannot face {facing}")]
    InvalidFacing {
        id: String,
        anchor: String,
        facing: String,
    },

    #[error("sub-space '{id}': 'from: {from}' is not an end of the {wall} wall")]
    InvalidFrom {
        id: String,
        from: String,
        wall: String,
    },
}

/// Errors in `<id>.<direction>` wall references.
#[derive(Debug, Error)]
pub enum WallReferenceError {
    #[error("invalid wall reference '{0}': expected '<room>.<direction>'")]
    BadFormat(String),

    #[error("invalid wall reference '{reference}': unknown direction '{direction}'")]
    UnknownDirection { reference: String, direction: String },

    #[error("invalid wall reference '{reference}': no room or sub-space named '{target}'")]
    UnknownTarget { reference: String, target: String },
}

/// Convenience type alias for results using [`FloorScriptError`].
pub type Result<T> = std::result::Result<T, FloorScriptError>;

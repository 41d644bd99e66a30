pub mod detect;
pub mod frame;
pub mod replay;
pub mod speech;

/// Label the classifier uses for doorways.
pub const DOOR_LABEL: &str = "door";

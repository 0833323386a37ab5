//! Error types shared by the diagram toolkit.

use thiserror::Error;

pub type Result<T> = std::result::Result<T,DiagramError>;

#[derive(Debug,Error)]
pub enum DiagramError {
    #[error("time axis must hold at least two finite, strictly increasing points")]
    InvalidTimeAxis,

    #[error("data holds {data} time points but the time axis has {time}")]
    LengthMismatch { time:usize, data:usize },

    #[error("cannot broadcast {element} stacked events onto a channel holding {channel}")]
    ShapeMismatch { channel:usize, element:usize },

    #[error("invalid {shape} parameters: {reason}")]
    InvalidShape { shape:&'static str, reason:String },

    #[error("channel \"{0}\" is already part of the sequence")]
    DuplicateChannel(String),

    #[error("channel \"{0}\" is not part of the sequence")]
    UnknownChannel(String),

    #[error("a diagram needs at least one axis")]
    NoAxes,

    #[error("axis \"{0}\" has no channels mapped onto it")]
    EmptyAxis(String),

    #[error("channels \"{first}\" and \"{other}\" do not share the same time axis")]
    TimeAxisMismatch { first:String, other:String },

    #[error("axis index {index} is out of range for a diagram with {n_axes} axes")]
    AxisIndex { index:usize, n_axes:usize },

    #[error("{colors} colors given for {channels} channels")]
    ColorCount { colors:usize, channels:usize },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("cannot parse style file: {0}")]
    StyleFormat(#[from] toml::de::Error),

    #[error("cannot serialize style: {0}")]
    StyleSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DiagramError {
    pub fn invalid_shape(shape:&'static str,reason:impl Into<String>) -> Self {
        Self::InvalidShape { shape, reason:reason.into() }
    }
}

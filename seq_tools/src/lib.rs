//! Pulse sequence diagrams: channels of scanner events on a shared time axis, mapped onto a
//! stack of plot axes and drawn with plotters.

pub mod axis_map;
pub mod channel;
pub mod diagram;
pub mod error;
pub mod figure;
pub mod render;
pub mod sequence;
pub mod shapes;
pub mod style;

pub use axis_map::{AxisEntry, AxisMap};
pub use channel::{Amplitude, Channel, TimeAxis};
pub use diagram::{AxisSelection, Diagram};
pub use error::{DiagramError, Result};
pub use figure::{Annotation, ArrowStyle, Figure, LineSpec, LineStyle, Panel, Trace};
pub use sequence::Sequence;
pub use style::{ConfigFile, Palette, Rgb, Style};

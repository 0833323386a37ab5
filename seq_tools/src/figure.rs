//! Resolved layout of a diagram: what gets drawn where, independent of the drawing backend.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use crate::style::{Rgb, BLACK};

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowStyle {
    None,
    Start,
    End,
    Both,
}

#[derive(Clone,Copy,Debug,PartialEq,Serialize,Deserialize)]
pub struct LineSpec {
    pub style:LineStyle,
    pub color:Rgb,
    pub alpha:f64,
}

impl Default for LineSpec {
    fn default() -> Self {
        Self {
            style:LineStyle::Dotted,
            color:BLACK,
            alpha:0.5,
        }
    }
}

impl LineSpec {
    pub fn new(style:LineStyle,color:Rgb,alpha:f64) -> Self {
        Self{style,color,alpha}
    }
}

#[derive(Clone,Debug,PartialEq,Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// vertical guide spanning the whole height of the axis
    VLine { t:f64, line:LineSpec },
    /// text centred above `(x, y)`
    Label { x:f64, y:f64, text:String },
    /// horizontal measurement arrow with an optional label at its centre
    HLine { xs:(f64,f64), y:f64, text:Option<String>, arrows:ArrowStyle },
}

/// One stacked column of one channel.
#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct Trace {
    pub channel:String,
    pub column:usize,
    pub color:Rgb,
    pub fill_alpha:f64,
    /// contiguous runs of defined samples
    pub segments:Vec<Vec<(f64,f64)>>,
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct Panel {
    pub label:String,
    pub y_range:(f64,f64),
    pub traces:Vec<Trace>,
    /// time spans where the time axis line is drawn
    pub time_axis:Vec<(f64,f64)>,
    pub annotations:Vec<Annotation>,
}

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct Figure {
    pub time_range:(f64,f64),
    pub width:u32,
    pub height:u32,
    pub panels:Vec<Panel>,
}

impl Figure {
    pub fn n_traces(&self) -> usize {
        self.panels.iter().map(|p| p.traces.len()).sum()
    }
}

/// split a waveform into runs of defined samples
pub(crate) fn segments(t:ArrayView1<'_,f64>,y:ArrayView1<'_,f64>) -> Vec<Vec<(f64,f64)>> {
    let defined:Vec<bool> = y.iter().map(|v| !v.is_nan()).collect();
    utils::true_runs(&defined).into_iter()
        .map(|run| run.map(|i| (t[i],y[i])).collect())
        .collect()
}

/// Spans of the time axis where every channel of a panel is empty. Each span is stretched by one
/// sample on both sides so the axis meets the waveforms next to it.
pub(crate) fn empty_spans(t:ArrayView1<'_,f64>,empty:&[bool]) -> Vec<(f64,f64)> {
    let last = t.len() - 1;
    utils::true_runs(empty).into_iter()
        .map(|run| (t[run.start.saturating_sub(1)],t[run.end.min(last)]))
        .collect()
}

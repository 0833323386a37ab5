use std::fmt;
use std::sync::Arc;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::debug;
use crate::error::{DiagramError, Result};
use crate::shapes::Shape;

/// Time grid shared by every channel of a sequence. Clones share the same storage.
#[derive(Clone,Debug)]
pub struct TimeAxis {
    values:Arc<Array1<f64>>,
}

impl TimeAxis {
    pub fn new(values:Array1<f64>) -> Result<Self> {
        if values.len() < 2 || values.iter().any(|v| !v.is_finite()) {
            return Err(DiagramError::InvalidTimeAxis)
        }
        if values.iter().zip(values.iter().skip(1)).any(|(a,b)| b <= a) {
            return Err(DiagramError::InvalidTimeAxis)
        }
        Ok(Self{values:Arc::new(values)})
    }

    /// evenly spaced grid including both end points
    pub fn linspace(start:f64,end:f64,n_points:usize) -> Result<Self> {
        Self::new(Array1::linspace(start,end,n_points))
    }

    pub fn values(&self) -> ArrayView1<'_,f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn start(&self) -> f64 {
        self.values[0]
    }

    pub fn end(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// true when both axes share storage or hold the same points
    pub fn same_grid(&self,other:&TimeAxis) -> bool {
        Arc::ptr_eq(&self.values,&other.values) || self.values == other.values
    }
}

/// Amplitude applied to a unit element. A stacked amplitude broadcasts the element into one
/// column per value, e.g. the steps of a phase encoding table.
#[derive(Clone,Debug,PartialEq)]
pub enum Amplitude {
    Scalar(f64),
    Stacked(Vec<f64>),
}

impl Amplitude {
    fn width(&self) -> usize {
        match self {
            Amplitude::Scalar(_) => 1,
            Amplitude::Stacked(a) => a.len(),
        }
    }
    fn get(&self,column:usize) -> f64 {
        match self {
            Amplitude::Scalar(a) => *a,
            Amplitude::Stacked(a) => a[column],
        }
    }
}

impl From<f64> for Amplitude {
    fn from(a:f64) -> Self {
        Amplitude::Scalar(a)
    }
}

impl From<Vec<f64>> for Amplitude {
    fn from(a:Vec<f64>) -> Self {
        Amplitude::Stacked(a)
    }
}

impl From<&[f64]> for Amplitude {
    fn from(a:&[f64]) -> Self {
        Amplitude::Stacked(a.to_vec())
    }
}

impl From<Array1<f64>> for Amplitude {
    fn from(a:Array1<f64>) -> Self {
        Amplitude::Stacked(a.to_vec())
    }
}

/// NaN marks an empty sample: it never hides a defined value
fn nan_add(a:f64,b:f64) -> f64 {
    match (a.is_nan(),b.is_nan()) {
        (true,true) => f64::NAN,
        (true,false) => b,
        (false,true) => a,
        (false,false) => a + b
    }
}

/// Scanner events over a time grid.
///
/// Data is held as `(n_time, n_stacked)`. The second axis stacks events that happen at the same
/// time, like the different steps of a phase encoding gradient. NaN samples carry no event.
#[derive(Clone,Debug)]
pub struct Channel {
    time:TimeAxis,
    data:Array2<f64>,
    elements:Vec<String>,
}

impl Channel {
    /// empty channel on the given grid
    pub fn new(time:&TimeAxis) -> Self {
        Self {
            time:time.clone(),
            data:Array2::from_elem((time.len(),1),f64::NAN),
            elements:vec![],
        }
    }

    pub fn from_array(time:&TimeAxis,data:Array1<f64>) -> Result<Self> {
        Self::from_stacked(time,data.insert_axis(Axis(1)))
    }

    /// wrap a `(n_time, n_stacked)` array
    pub fn from_stacked(time:&TimeAxis,data:Array2<f64>) -> Result<Self> {
        if data.nrows() != time.len() {
            return Err(DiagramError::LengthMismatch{time:time.len(),data:data.nrows()})
        }
        if data.ncols() == 0 {
            return Err(DiagramError::ShapeMismatch{channel:1,element:0})
        }
        Ok(Self {
            time:time.clone(),
            data,
            elements:vec![String::from("array")],
        })
    }

    /// Evaluate `shape` on the channel's grid, scale it and accumulate it onto the channel.
    pub fn add_element<S,A>(&mut self,shape:&S,amplitude:A) -> Result<&mut Self>
        where S:Shape + ?Sized, A:Into<Amplitude> {
        let amplitude = amplitude.into();
        let unit = shape.render(self.time.values());
        if unit.len() != self.time.len() {
            return Err(DiagramError::LengthMismatch{time:self.time.len(),data:unit.len()})
        }
        let current = self.data.ncols();
        let incoming = amplitude.width();
        let width = match (current,incoming) {
            (c,i) if c == i => c,
            (1,i) if i > 0 => i,
            (c,1) => c,
            (c,i) => return Err(DiagramError::ShapeMismatch{channel:c,element:i})
        };
        let data = Array2::from_shape_fn((self.time.len(),width),|(i,j)| {
            let existing = self.data[[i,if current == 1 {0} else {j}]];
            let added = unit[i]*amplitude.get(if incoming == 1 {0} else {j});
            nan_add(existing,added)
        });
        debug!("added {} to channel ({} time points, {} stacked)",shape.name(),self.time.len(),width);
        self.data = data;
        self.elements.push(shape.name().to_string());
        Ok(self)
    }

    /// builder form of `add_element`
    pub fn with_element<S,A>(mut self,shape:&S,amplitude:A) -> Result<Self>
        where S:Shape + ?Sized, A:Into<Amplitude> {
        self.add_element(shape,amplitude)?;
        Ok(self)
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    pub fn data(&self) -> ArrayView2<'_,f64> {
        self.data.view()
    }

    pub fn n_stacked(&self) -> usize {
        self.data.ncols()
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// smallest and largest defined value, None for an empty channel
    pub fn value_range(&self) -> Option<(f64,f64)> {
        utils::nan_min_max(self.data.iter().copied())
    }

    /// true for every time point where none of the stacked events is defined
    pub fn empty_mask(&self) -> Vec<bool> {
        self.data.axis_iter(Axis(0))
            .map(|row| row.iter().all(|v| v.is_nan()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|v| v.is_nan())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self,f:&mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"channel with [{}]",self.elements.join(", "))
    }
}

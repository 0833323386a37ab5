use std::path::Path;
use ndarray::Axis;
use tracing::{debug, warn};
use crate::axis_map::{AxisEntry, AxisMap};
use crate::channel::{Channel, TimeAxis};
use crate::error::{DiagramError, Result};
use crate::figure::{self, Annotation, ArrowStyle, Figure, LineSpec, Panel, Trace};
use crate::render;
use crate::sequence::Sequence;
use crate::style::Style;

/// Axes an annotation is drawn on.
#[derive(Clone,Debug,PartialEq)]
pub enum AxisSelection {
    All,
    Only(Vec<usize>),
}

impl AxisSelection {
    fn contains(&self,axis:usize) -> bool {
        match self {
            AxisSelection::All => true,
            AxisSelection::Only(axes) => axes.contains(&axis),
        }
    }
}

/// Sequence channels mapped onto a stack of axes that share the time axis.
///
/// The diagram borrows its sequence, so the channels cannot change while it exists.
#[derive(Debug)]
pub struct Diagram<'a> {
    sequence:&'a Sequence,
    axes:Vec<AxisEntry>,
    time:TimeAxis,
    y_overrides:Vec<Option<(f64,f64)>>,
    annotations:Vec<(AxisSelection,Annotation)>,
}

impl<'a> Diagram<'a> {
    pub fn new(sequence:&'a Sequence,axis_map:AxisMap) -> Result<Self> {
        if axis_map.is_empty() {
            return Err(DiagramError::NoAxes)
        }
        let mut reference:Option<(&str,&Channel)> = None;
        for entry in axis_map.entries() {
            if entry.channels.is_empty() {
                return Err(DiagramError::EmptyAxis(entry.label.clone()))
            }
            for name in &entry.channels {
                let channel = sequence.channel(name)
                    .ok_or_else(|| DiagramError::UnknownChannel(name.clone()))?;
                match reference {
                    None => reference = Some((name.as_str(),channel)),
                    Some((first,first_channel)) => {
                        if !first_channel.time().same_grid(channel.time()) {
                            return Err(DiagramError::TimeAxisMismatch{
                                first:first.to_string(),
                                other:name.clone()
                            })
                        }
                    }
                }
            }
        }
        let time = reference.map(|(_,c)| c.time().clone()).ok_or(DiagramError::NoAxes)?;
        let axes = axis_map.entries().to_vec();
        debug!("diagram with {} axes over {} time points",axes.len(),time.len());
        Ok(Self {
            sequence,
            y_overrides:vec![None;axes.len()],
            axes,
            time,
            annotations:vec![],
        })
    }

    /// one axis per channel in sequence order
    pub fn with_default_axes(sequence:&'a Sequence) -> Result<Self> {
        Self::new(sequence,AxisMap::one_per_channel(sequence))
    }

    pub fn n_axes(&self) -> usize {
        self.axes.len()
    }

    pub fn axis_labels(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.label.as_str()).collect()
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// channels drawn on one axis, in mapping order
    pub fn channels_on(&self,axis:usize) -> Result<Vec<(&str,&'a Channel)>> {
        let entry = self.axes.get(axis).ok_or(DiagramError::AxisIndex{index:axis,n_axes:self.axes.len()})?;
        entry.channels.iter().map(|name| {
            self.sequence.channel(name)
                .map(|c| (name.as_str(),c))
                .ok_or_else(|| DiagramError::UnknownChannel(name.clone()))
        }).collect()
    }

    /// number of channel slots, a channel mapped onto two axes counts twice
    pub fn n_slots(&self) -> usize {
        self.axes.iter().map(|a| a.channels.len()).sum()
    }

    fn check_axis(&self,axis:usize) -> Result<()> {
        match axis < self.axes.len() {
            true => Ok(()),
            false => Err(DiagramError::AxisIndex{index:axis,n_axes:self.axes.len()})
        }
    }

    /// Limits shared by all axes: start from zero and widen to the padded extremes of every
    /// mapped channel.
    pub fn y_limits(&self,padding_factor:f64) -> (f64,f64) {
        let mut lim = (0.0_f64,0.0_f64);
        for entry in &self.axes {
            for name in &entry.channels {
                let range = self.sequence.channel(name).and_then(|c| c.value_range());
                if let Some((lo,hi)) = range {
                    lim.0 = lim.0.min(padding_factor*lo);
                    lim.1 = lim.1.max(padding_factor*hi);
                }
            }
        }
        if lim.1 - lim.0 <= 0.0 {
            // nothing to show, keep a usable range around the axis
            return (-1.0,1.0)
        }
        lim
    }

    pub fn set_ylim(&mut self,axis:usize,lo:f64,hi:f64) -> Result<&mut Self> {
        self.check_axis(axis)?;
        self.y_overrides[axis] = Some((lo,hi));
        Ok(self)
    }

    pub fn add_vline(&mut self,axes:AxisSelection,t:f64,line:LineSpec) -> Result<&mut Self> {
        if let AxisSelection::Only(indices) = &axes {
            for i in indices {
                self.check_axis(*i)?;
            }
        }
        self.annotations.push((axes,Annotation::VLine{t,line}));
        Ok(self)
    }

    pub fn add_label(&mut self,axis:usize,x:f64,y:f64,text:&str) -> Result<&mut Self> {
        self.check_axis(axis)?;
        self.annotations.push((AxisSelection::Only(vec![axis]),Annotation::Label{x,y,text:text.to_string()}));
        Ok(self)
    }

    pub fn add_hline(&mut self,axis:usize,xs:(f64,f64),y:f64,text:Option<&str>,arrows:ArrowStyle) -> Result<&mut Self> {
        self.check_axis(axis)?;
        self.annotations.push((AxisSelection::Only(vec![axis]),Annotation::HLine{
            xs,
            y,
            text:text.map(|s| s.to_string()),
            arrows
        }));
        Ok(self)
    }

    /// Resolve colors, limits, waveform segments, time axis spans and annotations.
    pub fn figure(&self,style:&Style) -> Result<Figure> {
        let colors = style.slot_colors(self.n_slots())?;
        let shared_limits = self.y_limits(style.padding_factor);
        let t = self.time.values();
        let mut slot = 0;
        let mut panels = Vec::<Panel>::with_capacity(self.axes.len());
        for (axis,entry) in self.axes.iter().enumerate() {
            let channels = self.channels_on(axis)?;
            let mut traces = Vec::<Trace>::new();
            let mut empty = vec![true;t.len()];
            for (name,channel) in &channels {
                if channel.is_empty() {
                    warn!("channel {} on axis {} has no events",name,entry.label);
                }
                let color = colors[slot];
                slot += 1;
                for (column,signal) in channel.data().axis_iter(Axis(1)).enumerate() {
                    traces.push(Trace {
                        channel:name.to_string(),
                        column,
                        color,
                        fill_alpha:style.alpha,
                        segments:figure::segments(t,signal),
                    });
                }
                empty.iter_mut().zip(channel.empty_mask()).for_each(|(e,c)| *e = *e && c);
            }
            let time_axis = match style.time_axis_on_top {
                true => vec![(self.time.start(),self.time.end())],
                false => figure::empty_spans(t,&empty),
            };
            let annotations = self.annotations.iter()
                .filter(|(sel,_)| sel.contains(axis))
                .map(|(_,a)| a.clone())
                .collect();
            panels.push(Panel {
                label:entry.label.clone(),
                y_range:self.y_overrides[axis].unwrap_or(shared_limits),
                traces,
                time_axis,
                annotations,
            });
        }
        Ok(Figure {
            time_range:(self.time.start(),self.time.end()),
            width:style.width,
            height:style.height,
            panels,
        })
    }

    pub fn render_svg(&self,style:&Style) -> Result<String> {
        render::render_svg(&self.figure(style)?,style)
    }

    pub fn save_svg(&self,path:&Path,style:&Style) -> Result<()> {
        render::save_svg(path,&self.figure(style)?,style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use crate::figure::LineStyle;
    use crate::shapes::{Rect, Trapezoid};

    fn sequence() -> Sequence {
        let t = TimeAxis::linspace(0.0,4.0,33).unwrap();
        let rf = Channel::new(&t).with_element(&Rect::new(0.5,0.5).unwrap(),1.0).unwrap();
        let adc = Channel::new(&t).with_element(&Rect::new(2.0,1.0).unwrap(),0.5).unwrap();
        let phase = Channel::new(&t)
            .with_element(&Trapezoid::new(1.0,1.25,1.5).unwrap(),vec![-2.0,-1.0,0.0,1.0,2.0]).unwrap();
        Sequence::new()
            .with_channel("rf",rf).unwrap()
            .with_channel("adc",adc).unwrap()
            .with_channel("phase",phase).unwrap()
    }

    #[test]
    fn default_axes_follow_the_sequence(){
        let seq = sequence();
        let d = Diagram::with_default_axes(&seq).unwrap();
        assert_eq!(d.n_axes(),3);
        assert_eq!(d.axis_labels(),vec!["rf","adc","phase"]);
    }

    #[test]
    fn grouped_channels_share_an_axis(){
        let seq = sequence();
        let map = AxisMap::new().axis("RF/ADC",&["rf","adc"]).axis("Phase",&["phase"]);
        let d = Diagram::new(&seq,map).unwrap();
        assert_eq!(d.n_axes(),2);
        assert_eq!(d.n_slots(),3);
        let fig = d.figure(&Style::default()).unwrap();
        assert_eq!(fig.panels[0].traces.len(),2);
        assert_eq!(fig.panels[0].traces[0].channel,"rf");
        assert_eq!(fig.panels[0].traces[1].channel,"adc");
        assert_ne!(fig.panels[0].traces[0].color,fig.panels[0].traces[1].color);
        // one trace per phase step
        assert_eq!(fig.panels[1].traces.len(),5);
        assert_eq!(fig.n_traces(),7);
    }

    #[test]
    fn mapping_errors(){
        let seq = sequence();
        assert!(matches!(Diagram::new(&seq,AxisMap::new()),Err(DiagramError::NoAxes)));
        let unknown = AxisMap::new().axis("x",&["slice"]);
        assert!(matches!(Diagram::new(&seq,unknown),Err(DiagramError::UnknownChannel(n)) if n == "slice"));
        let empty = AxisMap::new().axis("x",&[]);
        assert!(matches!(Diagram::new(&seq,empty),Err(DiagramError::EmptyAxis(l)) if l == "x"));
    }

    #[test]
    fn channels_must_share_the_time_axis(){
        let t1 = TimeAxis::new(array![0.0,1.0,2.0]).unwrap();
        let t2 = TimeAxis::new(array![0.0,1.0,2.0,3.0]).unwrap();
        let seq = Sequence::new()
            .with_channel("a",Channel::from_array(&t1,array![0.0,1.0,0.0]).unwrap()).unwrap()
            .with_channel("b",Channel::from_array(&t2,array![0.0,1.0,1.0,0.0]).unwrap()).unwrap();
        let err = Diagram::with_default_axes(&seq).unwrap_err();
        assert!(matches!(err,DiagramError::TimeAxisMismatch{first,other} if first == "a" && other == "b"));
        // each channel on its own is fine
        assert!(Diagram::new(&seq,AxisMap::new().axis("b",&["b"])).is_ok());
    }

    #[test]
    fn shared_limits_are_padded(){
        let seq = sequence();
        let d = Diagram::with_default_axes(&seq).unwrap();
        let (lo,hi) = d.y_limits(1.1);
        assert!((lo + 2.2).abs() < 1E-12);
        assert!((hi - 2.2).abs() < 1E-12);
    }

    #[test]
    fn positive_channels_keep_zero_in_range(){
        let t = TimeAxis::new(array![0.0,1.0,2.0]).unwrap();
        let seq = Sequence::from_arrays(&t,vec![("adc",array![f64::NAN,1.0,f64::NAN])]).unwrap();
        let d = Diagram::with_default_axes(&seq).unwrap();
        assert_eq!(d.y_limits(1.0),(0.0,1.0));
        let empty = Sequence::new().with_channel("rf",Channel::new(&t)).unwrap();
        assert_eq!(Diagram::with_default_axes(&empty).unwrap().y_limits(1.1),(-1.0,1.0));
    }

    #[test]
    fn time_axis_only_where_the_panel_is_empty(){
        let seq = sequence();
        let map = AxisMap::new().axis("RF/ADC",&["rf","adc"]);
        let d = Diagram::new(&seq,map).unwrap();
        let fig = d.figure(&Style::default()).unwrap();
        // rf covers 0.5..1.0, adc covers 2.0..3.0
        assert_eq!(fig.panels[0].time_axis,vec![(0.0,0.5),(1.0,2.0),(3.0,4.0)]);
        let mut on_top = Style::default();
        on_top.time_axis_on_top = true;
        let fig = d.figure(&on_top).unwrap();
        assert_eq!(fig.panels[0].time_axis,vec![(0.0,4.0)]);
    }

    #[test]
    fn annotations_land_on_their_axes(){
        let seq = sequence();
        let mut d = Diagram::with_default_axes(&seq).unwrap();
        d.add_vline(AxisSelection::All,1.0,LineSpec::default()).unwrap();
        d.add_vline(AxisSelection::Only(vec![2]),2.0,LineSpec::new(LineStyle::Dashed,crate::style::BLACK,1.0)).unwrap();
        d.add_label(0,0.75,-0.5,"excitation").unwrap();
        d.add_hline(1,(0.75,2.5),1.2,Some("TE"),ArrowStyle::Both).unwrap();
        d.set_ylim(0,-1.0,2.0).unwrap();
        assert!(d.add_label(3,0.0,0.0,"nope").is_err());
        assert!(d.add_vline(AxisSelection::Only(vec![0,5]),1.0,LineSpec::default()).is_err());
        let fig = d.figure(&Style::default()).unwrap();
        assert_eq!(fig.panels[0].annotations.len(),2);
        assert_eq!(fig.panels[1].annotations.len(),2);
        assert_eq!(fig.panels[2].annotations.len(),2);
        assert_eq!(fig.panels[0].y_range,(-1.0,2.0));
        assert_eq!(fig.panels[1].y_range,d.y_limits(1.1));
    }

    #[test]
    fn explicit_colors_are_checked(){
        let seq = sequence();
        let d = Diagram::with_default_axes(&seq).unwrap();
        let mut style = Style::default();
        style.colors = Some(vec![crate::style::BLACK;2]);
        assert!(matches!(d.figure(&style),Err(DiagramError::ColorCount{colors:2,channels:3})));
    }
}

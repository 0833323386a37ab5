use serde::{Deserialize, Serialize};
use crate::sequence::Sequence;

/// One plot axis and the channels drawn on it.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct AxisEntry {
    pub label:String,
    pub channels:Vec<String>,
}

/// Layout of a diagram: axes from top to bottom, each listing the channels it shows.
#[derive(Clone,Debug,Default,PartialEq,Serialize,Deserialize)]
pub struct AxisMap {
    axes:Vec<AxisEntry>,
}

impl AxisMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// one axis per channel, labelled with the channel name
    pub fn one_per_channel(sequence:&Sequence) -> Self {
        Self {
            axes:sequence.names().map(|name| AxisEntry{
                label:name.to_string(),
                channels:vec![name.to_string()]
            }).collect()
        }
    }

    pub fn axis(mut self,label:&str,channels:&[&str]) -> Self {
        self.push(label,channels);
        self
    }

    pub fn push(&mut self,label:&str,channels:&[&str]) {
        self.axes.push(AxisEntry{
            label:label.to_string(),
            channels:channels.iter().map(|c| c.to_string()).collect()
        });
    }

    pub fn entries(&self) -> &[AxisEntry] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// number of channel slots over all axes
    pub fn n_slots(&self) -> usize {
        self.axes.iter().map(|a| a.channels.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use crate::channel::TimeAxis;

    #[test]
    fn default_map_has_one_axis_per_channel(){
        let t = TimeAxis::new(array![0.0,1.0]).unwrap();
        let seq = Sequence::from_arrays(&t,vec![
            ("rf",array![0.0,1.0]),
            ("adc",array![1.0,0.0]),
            ("read",array![1.0,1.0]),
        ]).unwrap();
        let map = AxisMap::one_per_channel(&seq);
        assert_eq!(map.len(),3);
        assert_eq!(map.n_slots(),3);
        assert_eq!(map.entries()[1],AxisEntry{label:"adc".to_string(),channels:vec!["adc".to_string()]});
    }

    #[test]
    fn custom_map_groups_channels(){
        let map = AxisMap::new()
            .axis("RF/ADC",&["rf","adc"])
            .axis("Readout",&["read"]);
        assert_eq!(map.len(),2);
        assert_eq!(map.n_slots(),3);
        assert_eq!(map.entries()[0].channels,vec!["rf".to_string(),"adc".to_string()]);
    }
}

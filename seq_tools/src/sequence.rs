use ndarray::Array1;
use tracing::debug;
use crate::channel::{Channel, TimeAxis};
use crate::error::{DiagramError, Result};

/// Named channels of one pulse sequence, kept in insertion order.
#[derive(Clone,Debug,Default)]
pub struct Sequence {
    channels:Vec<(String,Channel)>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// build a sequence from raw arrays that all live on `time`
    pub fn from_arrays<I,S>(time:&TimeAxis,arrays:I) -> Result<Self>
        where I:IntoIterator<Item=(S,Array1<f64>)>, S:Into<String> {
        let mut seq = Self::new();
        for (name,data) in arrays {
            seq.add_channel(name,Channel::from_array(time,data)?)?;
        }
        Ok(seq)
    }

    pub fn add_channel(&mut self,name:impl Into<String>,channel:Channel) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(DiagramError::DuplicateChannel(name))
        }
        debug!("sequence: adding {} as {}",channel,name);
        self.channels.push((name,channel));
        Ok(())
    }

    pub fn with_channel(mut self,name:impl Into<String>,channel:Channel) -> Result<Self> {
        self.add_channel(name,channel)?;
        Ok(self)
    }

    pub fn contains(&self,name:&str) -> bool {
        self.channels.iter().any(|(n,_)| n == name)
    }

    pub fn channel(&self,name:&str) -> Option<&Channel> {
        self.channels.iter().find(|(n,_)| n == name).map(|(_,c)| c)
    }

    pub fn names(&self) -> impl Iterator<Item=&str> + '_ {
        self.channels.iter().map(|(n,_)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str,&Channel)> + '_ {
        self.channels.iter().map(|(n,c)| (n.as_str(),c))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

use std::path::Path;
use tracing::info;
use seq_tools::Result;
use crate::epi::EpiParams;
use crate::gradient_echo::GradientEchoParams;
use crate::pulse_sequence::{DiagramSource, Initialize, SequenceParameters};

/// Registry of the ready-made diagrams.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum SequenceKind {
    GradientEcho,
    Epi,
}

impl SequenceKind {
    pub fn all() -> [SequenceKind;2] {
        [Self::GradientEcho,Self::Epi]
    }

    pub fn list() -> String {
        Self::all().iter().map(|s| s.decode()).collect::<Vec<String>>().join("\n")
    }

    pub fn encode(name:&str) -> Option<Self> {
        match name {
            "gradient_echo" | "gre" => Some(Self::GradientEcho),
            "epi" => Some(Self::Epi),
            _=> None
        }
    }

    pub fn decode(&self) -> String {
        match &self {
            Self::GradientEcho => String::from("gradient_echo"),
            Self::Epi => String::from("epi"),
        }
    }

    /// write the default parameters of this diagram to a json file
    pub fn write_default(&self,params_file:&Path) -> Result<()> {
        match self {
            Self::GradientEcho => GradientEchoParams::write_default(params_file),
            Self::Epi => EpiParams::write_default(params_file),
        }
    }

    /// build the diagram from a parameter file, or from the defaults when there is none
    pub fn instantiate(&self,params_file:Option<&Path>) -> Result<Box<dyn DiagramSource>> {
        let source = match (self,params_file) {
            (Self::GradientEcho,None) => GradientEchoParams::default().instantiate(),
            (Self::GradientEcho,Some(f)) => GradientEchoParams::load(f)?.instantiate(),
            (Self::Epi,None) => EpiParams::default().instantiate(),
            (Self::Epi,Some(f)) => EpiParams::load(f)?.instantiate(),
        };
        if let Some(f) = params_file {
            info!("{} parameters loaded from {:?}",self.decode(),f);
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip(){
        for kind in SequenceKind::all() {
            assert_eq!(SequenceKind::encode(&kind.decode()),Some(kind));
        }
        assert_eq!(SequenceKind::encode("gre"),Some(SequenceKind::GradientEcho));
        assert_eq!(SequenceKind::encode("fse"),None);
        assert_eq!(SequenceKind::list(),"gradient_echo\nepi");
    }
}

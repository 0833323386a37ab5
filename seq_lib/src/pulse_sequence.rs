use std::path::Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use seq_tools::{AxisMap, Diagram, Figure, Result, Sequence, Style};

/// Parameter sets that live in json files.
pub trait Initialize:Sized + Serialize + DeserializeOwned {
    fn default() -> Self;
    fn load(params_file:&Path) -> Result<Self> {
        let json_str = utils::read_to_string(params_file,"json")?;
        Ok(serde_json::from_str(&json_str)?)
    }
    fn write(&self,params_file:&Path) -> Result<()> {
        let str = serde_json::to_string_pretty(&self)?;
        utils::write_to_file(params_file,"json",&str)?;
        info!("parameters written to {:?}",params_file.with_extension("json"));
        Ok(())
    }
    fn write_default(params_file:&Path) -> Result<()> {
        Self::default().write(params_file)
    }
}

pub trait SequenceParameters {
    fn name(&self) -> String;
    fn instantiate(&self) -> Box<dyn DiagramSource>;
}

/// Anything that can lay out its own diagram: channels, axes and annotations.
pub trait DiagramSource {
    fn name(&self) -> String;
    fn sequence(&self) -> Result<Sequence>;
    fn axis_map(&self) -> AxisMap;
    fn annotate(&self,_diagram:&mut Diagram) -> Result<()> {
        Ok(())
    }
    fn figure(&self,style:&Style) -> Result<Figure> {
        let seq = self.sequence()?;
        let mut d = Diagram::new(&seq,self.axis_map())?;
        self.annotate(&mut d)?;
        d.figure(style)
    }
    fn render_svg(&self,style:&Style) -> Result<String> {
        let seq = self.sequence()?;
        let mut d = Diagram::new(&seq,self.axis_map())?;
        self.annotate(&mut d)?;
        d.render_svg(style)
    }
    fn save_svg(&self,path:&Path,style:&Style) -> Result<()> {
        let seq = self.sequence()?;
        let mut d = Diagram::new(&seq,self.axis_map())?;
        self.annotate(&mut d)?;
        d.save_svg(path,style)
    }
}

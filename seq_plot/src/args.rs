use std::path::PathBuf;
use seq_tools::Palette;

#[derive(clap::Parser,Debug)]
#[command(name = "seq_plot", about = "draw MRI pulse sequence diagrams")]
pub struct SeqPlotArgs {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(clap::Subcommand,Debug)]
pub enum Action {
    /// list the available sequence diagrams
    ListSequences,
    /// write the default parameters of a sequence diagram to a json file
    NewConfig(NewConfigArgs),
    /// write the default style to a toml file
    NewStyle(NewStyleArgs),
    /// render a sequence diagram to svg
    Render(RenderArgs),
}

#[derive(clap::Args,Debug)]
pub struct NewConfigArgs {
    pub name:String,
    pub destination:PathBuf,
}

#[derive(clap::Args,Debug)]
pub struct NewStyleArgs {
    pub destination:PathBuf,
}

#[derive(clap::Args,Debug)]
pub struct RenderArgs {
    pub name:String,
    pub output:PathBuf,
    /// sequence parameters, defaults are used when omitted
    #[clap(short, long)]
    pub params:Option<PathBuf>,
    #[clap(short, long)]
    pub style:Option<PathBuf>,
    #[clap(long, value_enum)]
    pub palette:Option<PaletteArg>,
    /// draw the time axis over the whole time range
    #[clap(long)]
    pub time_axis_on_top:bool,
    /// write the resolved layout as json instead of svg
    #[clap(long)]
    pub json:bool,
}

#[derive(clap::ValueEnum,Clone,Copy,Debug,PartialEq,Eq)]
pub enum PaletteArg {
    Tab10,
    Colorblind,
    Colors,
    Mono,
}

impl From<PaletteArg> for Palette {
    fn from(p:PaletteArg) -> Self {
        match p {
            PaletteArg::Tab10 => Palette::Tab10,
            PaletteArg::Colorblind => Palette::Colorblind,
            PaletteArg::Colors => Palette::Colors,
            PaletteArg::Mono => Palette::Mono,
        }
    }
}

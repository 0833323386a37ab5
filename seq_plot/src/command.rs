use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use tracing::info;
use seq_lib::library::SequenceKind;
use seq_lib::pulse_sequence::DiagramSource;
use seq_tools::{ConfigFile, Palette, Style};
use crate::args::{NewConfigArgs, NewStyleArgs, RenderArgs};

pub fn list_sequences() -> String {
    SequenceKind::list()
}

fn sequence_kind(name:&str) -> Result<SequenceKind> {
    match SequenceKind::encode(name) {
        Some(kind) => Ok(kind),
        None => bail!("unknown sequence {}. Available sequences:\n{}",name,SequenceKind::list())
    }
}

fn check_free(path:&Path) -> Result<()> {
    if path.exists() {
        bail!("{:?} already exists. Choose a different destination.",path)
    }
    Ok(())
}

/// writes default parameters and returns the file that was written
pub fn new_config(args:&NewConfigArgs) -> Result<PathBuf> {
    let kind = sequence_kind(&args.name)?;
    let path_out = args.destination.with_extension("json");
    check_free(&path_out)?;
    kind.write_default(&path_out)
        .with_context(|| format!("cannot write parameters to {:?}",path_out))?;
    Ok(path_out)
}

pub fn new_style(args:&NewStyleArgs) -> Result<PathBuf> {
    let path_out = args.destination.with_extension(Style::file_ext());
    check_free(&path_out)?;
    Style::default().to_file(&path_out)
        .with_context(|| format!("cannot write style to {:?}",path_out))?;
    Ok(path_out)
}

/// style from file or palette preset, then command line overrides
pub fn resolve_style(args:&RenderArgs) -> Result<Style> {
    let mut style = match (&args.style,args.palette) {
        (Some(file),palette) => {
            let mut s = Style::load(file)
                .with_context(|| format!("cannot load style from {:?}",file))?;
            if let Some(p) = palette {
                s.apply_palette(Palette::from(p));
            }
            s
        }
        (None,Some(p)) => Style::with_palette(p.into()),
        (None,None) => Style::default(),
    };
    if args.time_axis_on_top {
        style.time_axis_on_top = true;
    }
    Ok(style)
}

pub fn render(args:&RenderArgs) -> Result<()> {
    let kind = sequence_kind(&args.name)?;
    let style = resolve_style(args)?;
    let source = kind.instantiate(args.params.as_deref())
        .with_context(|| format!("cannot set up {}",kind.decode()))?;
    match args.json {
        true => {
            let figure = source.figure(&style)?;
            let json = serde_json::to_string_pretty(&figure)?;
            std::fs::write(&args.output,json)
                .with_context(|| format!("cannot write {:?}",args.output))?;
            info!("layout of {} written to {:?}",kind.decode(),args.output);
        }
        false => {
            source.save_svg(&args.output,&style)
                .with_context(|| format!("cannot render {} to {:?}",kind.decode(),args.output))?;
        }
    }
    Ok(())
}

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::error::{DiagramError, Result};

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct Rgb(pub u8,pub u8,pub u8);

pub const BLACK:Rgb = Rgb(0,0,0);

const TAB10:[Rgb;10] = [
    Rgb(31,119,180),
    Rgb(255,127,14),
    Rgb(44,160,44),
    Rgb(214,39,40),
    Rgb(148,103,189),
    Rgb(140,86,75),
    Rgb(227,119,194),
    Rgb(127,127,127),
    Rgb(188,189,34),
    Rgb(23,190,207),
];

const COLORBLIND:[Rgb;10] = [
    Rgb(1,115,178),
    Rgb(222,143,5),
    Rgb(2,158,115),
    Rgb(213,94,0),
    Rgb(204,120,188),
    Rgb(202,145,97),
    Rgb(251,175,228),
    Rgb(148,148,148),
    Rgb(236,225,51),
    Rgb(86,180,233),
];

// rf, phase, slice, readout, adc
const COLORS:[Rgb;5] = [
    Rgb(0,0,0),
    Rgb(230,128,0),
    Rgb(179,0,0),
    Rgb(0,0,179),
    Rgb(0,0,0),
];

#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Tab10,
    Colorblind,
    Colors,
    Mono,
}

impl Palette {
    pub fn colors(&self) -> &'static [Rgb] {
        match self {
            Palette::Tab10 => &TAB10,
            Palette::Colorblind => &COLORBLIND,
            Palette::Colors => &COLORS,
            Palette::Mono => &[BLACK],
        }
    }
    /// cycle through the palette
    pub fn pick(&self,index:usize) -> Rgb {
        let c = self.colors();
        c[index % c.len()]
    }
}

/// Rendering style of a diagram. Every field has a default, so style files only need the
/// entries they change.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct Style {
    pub palette:Palette,
    /// one color per channel slot, overrides the palette
    pub colors:Option<Vec<Rgb>>,
    /// opacity of the area under every waveform
    pub alpha:f64,
    pub time_axis_on_top:bool,
    pub axes_ticks:bool,
    /// arrow head width in data units
    pub arrow_width:f64,
    /// arrow head length as a fraction of the time span
    pub arrow_length:f64,
    pub line_width:u32,
    pub axes_line_width:u32,
    pub font_size:u32,
    pub axes_color:Rgb,
    pub padding_factor:f64,
    pub width:u32,
    pub height:u32,
    pub label_width:u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            palette:Palette::Tab10,
            colors:None,
            alpha:0.3,
            time_axis_on_top:false,
            axes_ticks:false,
            arrow_width:0.15,
            arrow_length:0.01,
            line_width:2,
            axes_line_width:2,
            font_size:20,
            axes_color:BLACK,
            padding_factor:1.1,
            width:1200,
            height:800,
            label_width:220,
        }
    }
}

impl Style {
    /// black lines without any fill
    pub fn monochrome() -> Self {
        Self {
            palette:Palette::Mono,
            alpha:0.0,
            ..Self::default()
        }
    }

    pub fn with_palette(palette:Palette) -> Self {
        let mut s = Self::default();
        s.apply_palette(palette);
        s
    }

    /// Switch to a palette preset. Explicit colors are dropped so the preset wins, and the
    /// fill opacity follows the preset where it has one.
    pub fn apply_palette(&mut self,palette:Palette) {
        self.palette = palette;
        self.colors = None;
        match palette {
            Palette::Mono => self.alpha = 0.0,
            Palette::Colors => self.alpha = 0.2,
            _=> {}
        }
    }

    /// read a style file from exactly `path`, whatever its extension
    pub fn load(path:&Path) -> Result<Self> {
        let t = std::fs::read_to_string(path)?;
        let s = toml::from_str(&t)?;
        info!("style loaded from {:?}",path);
        Ok(s)
    }

    /// colors of `n_slots` channel slots in drawing order
    pub fn slot_colors(&self,n_slots:usize) -> Result<Vec<Rgb>> {
        match &self.colors {
            Some(colors) => {
                if colors.len() != n_slots {
                    return Err(DiagramError::ColorCount{colors:colors.len(),channels:n_slots})
                }
                Ok(colors.clone())
            }
            None => Ok((0..n_slots).map(|i| self.palette.pick(i)).collect())
        }
    }
}

pub trait ConfigFile:Sized {
    fn to_file(&self,filename:&Path) -> Result<()>;
    fn from_file(filename:&Path) -> Result<Self>;
    fn file_ext() -> String;
}

impl ConfigFile for Style {
    fn to_file(&self,filename:&Path) -> Result<()> {
        let t = toml::to_string_pretty(&self)?;
        utils::write_to_file(filename,&Self::file_ext(),&t)?;
        info!("style written to {:?}",filename.with_extension(Self::file_ext()));
        Ok(())
    }
    fn from_file(filename:&Path) -> Result<Self> {
        let t = utils::read_to_string(filename,&Self::file_ext())?;
        Ok(toml::from_str(&t)?)
    }
    fn file_ext() -> String {
        String::from("toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_file_round_trip(){
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram_style");
        let mut s = Style::with_palette(Palette::Colorblind);
        s.colors = Some(vec![Rgb(1,2,3),Rgb(4,5,6)]);
        s.time_axis_on_top = true;
        s.to_file(&path).unwrap();
        assert!(dir.path().join("diagram_style.toml").exists());
        let loaded = Style::from_file(&path).unwrap();
        assert_eq!(loaded,s);
    }

    #[test]
    fn partial_style_file_takes_defaults(){
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path,"palette = \"mono\"\nalpha = 0.0\n").unwrap();
        let s = Style::from_file(&path).unwrap();
        assert_eq!(s.palette,Palette::Mono);
        assert_eq!(s.alpha,0.0);
        assert_eq!(s.font_size,Style::default().font_size);
        assert_eq!(s.padding_factor,1.1);
    }

    #[test]
    fn malformed_style_file_is_an_error(){
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path,"palette = 12\n").unwrap();
        assert!(matches!(Style::from_file(&path),Err(DiagramError::StyleFormat(_))));
    }

    #[test]
    fn style_is_read_from_the_given_path(){
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.cfg");
        std::fs::write(&path,"font_size = 14\n").unwrap();
        assert_eq!(Style::load(&path).unwrap().font_size,14);
        // no silent fallback onto a sibling .toml
        std::fs::write(dir.path().join("other.toml"),"font_size = 14\n").unwrap();
        assert!(matches!(Style::load(&dir.path().join("other.cfg")),Err(DiagramError::Io(_))));
    }

    #[test]
    fn palette_preset_overrides_a_loaded_style(){
        let mut s = Style::default();
        s.colors = Some(vec![Rgb(1,2,3);5]);
        s.alpha = 0.5;
        s.apply_palette(Palette::Mono);
        assert_eq!(s.colors,None);
        assert_eq!(s.alpha,0.0);
        assert!(s.slot_colors(5).unwrap().iter().all(|c| *c == BLACK));
        s.apply_palette(Palette::Colors);
        assert_eq!(s.alpha,0.2);
        assert_eq!(s.slot_colors(5).unwrap()[1],Rgb(230,128,0));
        assert_eq!(Style::with_palette(Palette::Mono),Style::monochrome());
    }

    #[test]
    fn explicit_colors_must_match_slots(){
        let mut s = Style::default();
        s.colors = Some(vec![BLACK;3]);
        assert!(s.slot_colors(3).is_ok());
        assert!(matches!(s.slot_colors(4),Err(DiagramError::ColorCount{colors:3,channels:4})));
    }

    #[test]
    fn palette_cycles(){
        let s = Style::default();
        let c = s.slot_colors(12).unwrap();
        assert_eq!(c[0],Rgb(31,119,180));
        assert_eq!(c[10],c[0]);
        let m = Style::monochrome().slot_colors(4).unwrap();
        assert!(m.iter().all(|c| *c == BLACK));
    }
}

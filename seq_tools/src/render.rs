//! Drawing of a resolved [`Figure`] with plotters.
//!
//! Axes are stacked from top to bottom without any gap between them. Only the time axis is
//! drawn; y ticks are never shown and x ticks only on request.

use std::iter::once;
use std::path::Path;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::info;
use crate::error::{DiagramError, Result};
use crate::figure::{Annotation, ArrowStyle, Figure, LineStyle, Panel};
use crate::style::{Rgb, Style};

// extra room right of the last time point, as a fraction of the time span
const RIGHT_PAD:f64 = 0.04;
// measurement arrow heads, as fractions of the panel extent
const HEAD_LENGTH:f64 = 0.012;
const HEAD_HALF_HEIGHT:f64 = 0.035;

fn rgb(c:Rgb) -> RGBColor {
    RGBColor(c.0,c.1,c.2)
}

fn render_error<E>(e:DrawingAreaErrorKind<E>) -> DiagramError
    where E:std::error::Error + Send + Sync {
    DiagramError::Render(e.to_string())
}

fn font(style:&Style,scale:f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif,style.font_size as f64*scale,FontStyle::Normal)
}

/// dash pattern of a vertical guide between `lo` and `hi`
pub(crate) fn dashes(line:LineStyle,lo:f64,hi:f64) -> Vec<(f64,f64)> {
    let (on,off) = match line {
        LineStyle::Solid => return vec![(lo,hi)],
        LineStyle::Dashed => (0.06,0.03),
        LineStyle::Dotted => (0.015,0.025),
    };
    let span = hi - lo;
    let mut out = Vec::<(f64,f64)>::new();
    let mut y = lo;
    while y < hi {
        out.push((y,(y + on*span).min(hi)));
        y += (on + off)*span;
    }
    out
}

pub fn draw<DB:DrawingBackend>(root:&DrawingArea<DB,Shift>,figure:&Figure,style:&Style) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;
    let areas = root.split_evenly((figure.panels.len().max(1),1));
    for (area,panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area,panel,figure.time_range,style)?;
    }
    Ok(())
}

fn draw_axis_label<DB:DrawingBackend>(area:&DrawingArea<DB,Shift>,label:&str,style:&Style) -> Result<()> {
    let (w,h) = area.dim_in_pixel();
    let lines:Vec<&str> = label.split('\n').collect();
    let line_height = style.font_size as f64*1.2;
    let top = h as f64/2.0 - line_height*lines.len() as f64/2.0 + line_height/2.0;
    let text_style = font(style,1.0)
        .color(&rgb(style.axes_color))
        .pos(Pos::new(HPos::Right,VPos::Center));
    for (i,line) in lines.iter().enumerate() {
        let y = top + i as f64*line_height;
        area.draw(&Text::new(line.to_string(),(w as i32 - 10,y as i32),text_style.clone()))
            .map_err(render_error)?;
    }
    Ok(())
}

fn draw_panel<DB:DrawingBackend>(area:&DrawingArea<DB,Shift>,panel:&Panel,time_range:(f64,f64),style:&Style) -> Result<()> {
    let (label_area,plot_area) = area.split_horizontally(style.label_width);
    draw_axis_label(&label_area,&panel.label,style)?;

    let (t0,t1) = time_range;
    let span = t1 - t0;
    let head = style.arrow_length*span;
    let x_max = t1 + head + RIGHT_PAD*span;
    let (y0,y1) = panel.y_range;
    let mut chart = ChartBuilder::on(&plot_area)
        .margin_right(10)
        .x_label_area_size(if style.axes_ticks {30} else {0})
        .build_cartesian_2d(t0..x_max,y0..y1)
        .map_err(render_error)?;

    if style.axes_ticks {
        chart.configure_mesh()
            .disable_mesh()
            .disable_y_axis()
            .x_labels(10)
            .label_style(font(style,0.6))
            .draw()
            .map_err(render_error)?;
    }

    for trace in &panel.traces {
        let c = rgb(trace.color);
        for segment in &trace.segments {
            if trace.fill_alpha > 0.0 {
                chart.draw_series(AreaSeries::new(segment.iter().copied(),0.0,c.mix(trace.fill_alpha).filled()))
                    .map_err(render_error)?;
            }
            chart.draw_series(LineSeries::new(segment.iter().copied(),c.stroke_width(style.line_width)))
                .map_err(render_error)?;
        }
    }

    let axis_color = rgb(style.axes_color);
    for &(a,b) in &panel.time_axis {
        chart.draw_series(LineSeries::new(vec![(a,0.0),(b,0.0)],axis_color.stroke_width(style.axes_line_width)))
            .map_err(render_error)?;
    }
    let half_width = 0.5*style.arrow_width;
    chart.draw_series(once(Polygon::new(vec![(t1,half_width),(t1,-half_width),(t1 + head,0.0)],axis_color.filled())))
        .map_err(render_error)?;
    chart.draw_series(once(Text::new(
        String::from("t"),
        (t1 + head + 0.01*span,0.0),
        font(style,1.0).color(&axis_color).pos(Pos::new(HPos::Left,VPos::Center))
    ))).map_err(render_error)?;

    for annotation in &panel.annotations {
        match annotation {
            Annotation::VLine{t,line} => {
                let c = rgb(line.color).mix(line.alpha);
                for (lo,hi) in dashes(line.style,y0,y1) {
                    chart.draw_series(once(PathElement::new(vec![(*t,lo),(*t,hi)],c.stroke_width(style.line_width))))
                        .map_err(render_error)?;
                }
            }
            Annotation::Label{x,y,text} => {
                chart.draw_series(once(Text::new(
                    text.clone(),
                    (*x,*y),
                    font(style,0.8).color(&axis_color).pos(Pos::new(HPos::Center,VPos::Bottom))
                ))).map_err(render_error)?;
            }
            Annotation::HLine{xs,y,text,arrows} => {
                let (x0,x1) = *xs;
                let line_style = axis_color.stroke_width(style.line_width);
                chart.draw_series(once(PathElement::new(vec![(x0,*y),(x1,*y)],line_style)))
                    .map_err(render_error)?;
                let dir = if x1 >= x0 {1.0} else {-1.0};
                let hl = dir*HEAD_LENGTH*(x_max - t0);
                let hh = HEAD_HALF_HEIGHT*(y1 - y0);
                let start_head = vec![(x0,*y),(x0 + hl,*y + hh),(x0 + hl,*y - hh)];
                let end_head = vec![(x1,*y),(x1 - hl,*y + hh),(x1 - hl,*y - hh)];
                let heads = match arrows {
                    ArrowStyle::None => vec![],
                    ArrowStyle::Start => vec![start_head],
                    ArrowStyle::End => vec![end_head],
                    ArrowStyle::Both => vec![start_head,end_head],
                };
                for h in heads {
                    chart.draw_series(once(Polygon::new(h,axis_color.filled())))
                        .map_err(render_error)?;
                }
                if let Some(text) = text {
                    chart.draw_series(once(Text::new(
                        text.clone(),
                        (utils::mean(x0,x1),*y + hh),
                        font(style,0.8).color(&axis_color).pos(Pos::new(HPos::Center,VPos::Bottom))
                    ))).map_err(render_error)?;
                }
            }
        }
    }
    Ok(())
}

/// render into an SVG document held in memory
pub fn render_svg(figure:&Figure,style:&Style) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg,(figure.width,figure.height)).into_drawing_area();
        draw(&root,figure,style)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

pub fn save_svg(path:&Path,figure:&Figure,style:&Style) -> Result<()> {
    {
        let root = SVGBackend::new(path,(figure.width,figure.height)).into_drawing_area();
        draw(&root,figure,style)?;
        root.present().map_err(render_error)?;
    }
    info!("diagram with {} axes written to {:?}",figure.panels.len(),path);
    Ok(())
}

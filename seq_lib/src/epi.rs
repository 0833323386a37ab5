/*
 Echo planar imaging diagram. After the excitation a dephasing lobe on the readout and phase axes
 moves to the corner of k-space. A train of readout gradients with alternating polarity then
 samples one line each, with small phase blips in between.
 */

use serde::{Deserialize, Serialize};
use tracing::debug;
use seq_tools::shapes::{Rect, SincPulse, Trapezoid};
use seq_tools::{AxisMap, AxisSelection, Channel, Diagram, LineSpec, LineStyle, Palette, Result, Sequence, TimeAxis};
use crate::pulse_sequence::{DiagramSource, Initialize, SequenceParameters};

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct EpiParams {
    pub name:String,
    pub t_start:f64,
    pub t_end:f64,
    pub n_time_points:usize,
    pub rf_start:f64,
    pub rf_duration:f64,
    pub side_lobes:u16,
    pub slice_ramp_time:f64,
    /// gap between the end of the rf pulse and the slice rephaser
    pub slice_rephase_delay:f64,
    pub slice_rephase_flat_time:f64,
    pub n_epi_steps:usize,
    pub t_epi_start:f64,
    /// whole readout gradient, ramps included
    pub dt_line:f64,
    /// flat top of a readout gradient
    pub dt_flat:f64,
    /// whole dephasing gradient, ramps included
    pub dt_line0:f64,
    pub dt_flat0:f64,
    pub phase_dephase_amplitude:f64,
    pub blip_amplitude:f64,
    pub adc_amplitude:f64,
}

impl Initialize for EpiParams {
    fn default() -> Self {
        EpiParams {
            name:"epi".to_string(),
            t_start:-0.2,
            t_end:20.0,
            n_time_points:10000,
            rf_start:0.2,
            rf_duration:0.8,
            side_lobes:2,
            slice_ramp_time:0.2,
            slice_rephase_delay:0.2,
            slice_rephase_flat_time:0.4,
            n_epi_steps:8,
            t_epi_start:2.2,
            dt_line:1.6,
            dt_flat:1.4,
            dt_line0:0.8,
            dt_flat0:0.6,
            phase_dephase_amplitude:-2.0,
            blip_amplitude:0.5,
            adc_amplitude:0.5,
        }
    }
}

impl SequenceParameters for EpiParams {
    fn name(&self) -> String {
        self.name.clone()
    }
    fn instantiate(&self) -> Box<dyn DiagramSource> {
        Box::new(Epi::new(self.clone()))
    }
}

/// Derived timing of the echo train.
#[derive(Clone,Copy,Debug,PartialEq)]
struct EpiTiming {
    ramp:f64,
    ramp0:f64,
    block_start:f64,
    blip_bottom:f64,
    blip_top:f64,
    blip_ramp:f64,
}

pub struct Epi {
    params:EpiParams,
}

impl Epi {
    pub fn new(params:EpiParams) -> Epi {
        Epi{params}
    }

    fn timing(&self) -> EpiTiming {
        let p = &self.params;
        let blip_bottom = p.dt_line - p.dt_flat;
        let blip_top = 0.8*blip_bottom;
        EpiTiming {
            ramp:0.5*(p.dt_line - p.dt_flat),
            ramp0:0.5*(p.dt_line0 - p.dt_flat0),
            block_start:p.t_epi_start + p.dt_line0,
            blip_bottom,
            blip_top,
            blip_ramp:0.5*(blip_bottom - blip_top),
        }
    }

    /// slice gradient flat during the whole rf pulse
    fn slice_select(&self) -> Result<Trapezoid> {
        let p = &self.params;
        Trapezoid::new(p.rf_start - p.slice_ramp_time,p.rf_start,p.rf_start + p.rf_duration)
    }

    fn slice_rephaser(&self) -> Result<Trapezoid> {
        let p = &self.params;
        let start = p.rf_start + p.rf_duration + p.slice_rephase_delay;
        Trapezoid::new(start,start + p.slice_ramp_time,start + p.slice_ramp_time + p.slice_rephase_flat_time)
    }

    fn dephaser(&self) -> Result<Trapezoid> {
        let p = &self.params;
        let tm = self.timing();
        Trapezoid::new(p.t_epi_start,p.t_epi_start + tm.ramp0,p.t_epi_start + tm.ramp0 + p.dt_flat0)
    }
}

impl DiagramSource for Epi {
    fn name(&self) -> String {
        self.params.name.clone()
    }

    fn sequence(&self) -> Result<Sequence> {
        let p = &self.params;
        let tm = self.timing();
        let t = TimeAxis::linspace(p.t_start,p.t_end,p.n_time_points)?;

        let rf = Channel::new(&t)
            .with_element(&SincPulse::new(p.rf_start,p.rf_duration,p.side_lobes)?,1.0)?;

        let slice = Channel::new(&t)
            .with_element(&self.slice_select()?,1.0)?
            .with_element(&self.slice_rephaser()?,-1.0)?;

        let mut freq = Channel::new(&t);
        freq.add_element(&self.dephaser()?,-1.0)?;
        for idx in 0..p.n_epi_steps {
            let polarity = if idx % 2 == 0 {1.0} else {-1.0};
            let start = tm.block_start + p.dt_line*idx as f64;
            freq.add_element(&Trapezoid::new(start,start + tm.ramp,start + tm.ramp + p.dt_flat)?,polarity)?;
        }

        let mut phase = Channel::new(&t);
        phase.add_element(&self.dephaser()?,p.phase_dephase_amplitude)?;
        for idx in 1..p.n_epi_steps {
            let start = tm.block_start + p.dt_line*idx as f64 - 0.5*tm.blip_bottom;
            let blip = Trapezoid::new(start,start + tm.blip_ramp,start + tm.blip_ramp + tm.blip_top)?;
            phase.add_element(&blip,p.blip_amplitude)?;
        }

        let mut adc = Channel::new(&t);
        for idx in 0..p.n_epi_steps {
            let start = tm.block_start + p.dt_line*idx as f64 + 0.5*tm.blip_bottom;
            adc.add_element(&Rect::new(start,p.dt_flat)?,p.adc_amplitude)?;
        }
        debug!("epi train of {} lines starting at {}",p.n_epi_steps,tm.block_start);

        Sequence::new()
            .with_channel("RF",rf)?
            .with_channel("ADC",adc)?
            .with_channel("Phase",phase)?
            .with_channel("Slice",slice)?
            .with_channel("Frequency",freq)
    }

    fn axis_map(&self) -> AxisMap {
        AxisMap::new()
            .axis("RF/ADC",&["RF","ADC"])
            .axis("Phase\nEncoding",&["Phase"])
            .axis("Slice\nSelection",&["Slice"])
            .axis("Frequency\nEncoding",&["Frequency"])
    }

    fn annotate(&self,diagram:&mut Diagram) -> Result<()> {
        let p = &self.params;
        let tm = self.timing();
        let first_line_end = tm.block_start + tm.ramp + p.dt_flat;
        let guide = |style:LineStyle,color:usize| LineSpec::new(style,Palette::Tab10.pick(color),0.5);
        diagram
            .add_vline(AxisSelection::All,p.t_epi_start,guide(LineStyle::Dotted,0))?
            .add_vline(AxisSelection::All,tm.block_start,guide(LineStyle::Dashed,1))?
            .add_vline(AxisSelection::All,first_line_end,guide(LineStyle::Dashed,2))?
            .add_vline(AxisSelection::All,first_line_end + tm.blip_bottom,guide(LineStyle::Dashed,2))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seq_tools::Style;

    fn small() -> Epi {
        let mut params = EpiParams::default();
        params.n_time_points = 2021;
        Epi::new(params)
    }

    #[test]
    fn derived_timing(){
        let tm = small().timing();
        assert!((tm.block_start - 3.0).abs() < 1E-12);
        assert!((tm.ramp - 0.1).abs() < 1E-12);
        assert!((tm.blip_bottom - 0.2).abs() < 1E-12);
        assert!((tm.blip_ramp - 0.02).abs() < 1E-12);
    }

    #[test]
    fn slice_gradient_follows_the_rf_pulse(){
        let default_slice = small().slice_select().unwrap();
        assert!(default_slice.t_start.abs() < 1E-12);
        assert!((default_slice.t_flat_out - 0.2).abs() < 1E-12);
        assert!((default_slice.t_ramp_down - 1.0).abs() < 1E-12);
        let rephaser = small().slice_rephaser().unwrap();
        assert!((rephaser.t_start - 1.2).abs() < 1E-12);
        assert!((rephaser.t_flat_out - 1.4).abs() < 1E-12);
        assert!((rephaser.t_ramp_down - 1.8).abs() < 1E-12);

        let mut params = EpiParams::default();
        params.n_time_points = 2021;
        params.rf_start = 1.0;
        let seq = Epi::new(params).sequence().unwrap();
        let slice = seq.channel("Slice").unwrap();
        let t = slice.time().values();
        let at = |time:f64| t.iter().position(|&ti| (ti - time).abs() < 1E-6).unwrap();
        // nothing before the ramp, fully on in the middle of the pulse
        assert!(slice.data()[[at(0.5),0]].is_nan());
        assert!((slice.data()[[at(1.4),0]] - 1.0).abs() < 1E-9);
        // rephaser moved along with the pulse
        assert!((slice.data()[[at(2.3),0]] + 1.0).abs() < 1E-9);
    }

    #[test]
    fn readout_alternates(){
        let epi = small();
        let seq = epi.sequence().unwrap();
        let freq = seq.channel("Frequency").unwrap();
        assert_eq!(freq.elements().len(),9);
        let t = freq.time().values();
        let data = freq.data();
        // middle of the first and second readout lines
        let first = t.iter().position(|&ti| (ti - 3.8).abs() < 1E-6).unwrap();
        let second = t.iter().position(|&ti| (ti - 5.4).abs() < 1E-6).unwrap();
        assert!((data[[first,0]] - 1.0).abs() < 1E-9);
        assert!((data[[second,0]] + 1.0).abs() < 1E-9);
        assert_eq!(seq.channel("Phase").unwrap().elements().len(),8);
        assert_eq!(seq.channel("ADC").unwrap().elements().len(),8);
    }

    #[test]
    fn guides_on_every_axis(){
        let fig = small().figure(&Style::monochrome()).unwrap();
        assert_eq!(fig.panels.len(),4);
        assert!(fig.panels.iter().all(|p| p.annotations.len() == 4));
    }
}

/*
 Gradient echo diagram: a slice selective sinc excitation, a phase encoding table, a dephasing and
 readout gradient on the frequency axis and the ADC window during the readout. RF and ADC share
 the top axis.
 */

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use seq_tools::shapes::{Rect, SincPulse, Trapezoid};
use seq_tools::{ArrowStyle, AxisMap, AxisSelection, Channel, Diagram, LineSpec, Result, Sequence, TimeAxis};
use crate::pulse_sequence::{DiagramSource, Initialize, SequenceParameters};

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct GradientEchoParams {
    pub name:String,
    pub t_start:f64,
    pub t_end:f64,
    pub n_time_points:usize,
    pub rf_start:f64,
    pub rf_duration:f64,
    pub side_lobes:u16,
    pub slice_ramp_time:f64,
    pub slice_flat_time:f64,
    pub prephase_start:f64,
    pub prephase_ramp_time:f64,
    pub prephase_flat_time:f64,
    pub n_phase_steps:usize,
    pub readout_start:f64,
    pub readout_ramp_time:f64,
    pub readout_flat_time:f64,
    pub readout_amplitude:f64,
    pub adc_start:f64,
    pub adc_duration:f64,
    /// y range of the RF/ADC axis, room for the echo time arrow
    pub rf_axis_limits:Option<(f64,f64)>,
}

impl Initialize for GradientEchoParams {
    fn default() -> Self {
        GradientEchoParams {
            name:"gradient_echo".to_string(),
            t_start:-0.2,
            t_end:4.5,
            n_time_points:10000,
            rf_start:0.2,
            rf_duration:0.8,
            side_lobes:2,
            slice_ramp_time:0.2,
            slice_flat_time:0.8,
            prephase_start:1.2,
            prephase_ramp_time:0.2,
            prephase_flat_time:0.4,
            n_phase_steps:10,
            readout_start:2.0,
            readout_ramp_time:0.2,
            readout_flat_time:1.6,
            readout_amplitude:0.5,
            adc_start:2.2,
            adc_duration:1.6,
            rf_axis_limits:Some((-1.0,2.0)),
        }
    }
}

impl SequenceParameters for GradientEchoParams {
    fn name(&self) -> String {
        self.name.clone()
    }
    fn instantiate(&self) -> Box<dyn DiagramSource> {
        Box::new(GradientEcho::new(self.clone()))
    }
}

pub struct GradientEcho {
    params:GradientEchoParams,
}

impl GradientEcho {
    pub fn new(params:GradientEchoParams) -> GradientEcho {
        GradientEcho{params}
    }

    fn excitation_center(&self) -> f64 {
        self.params.rf_start + 0.5*self.params.rf_duration
    }

    fn echo_center(&self) -> f64 {
        self.params.adc_start + 0.5*self.params.adc_duration
    }

    fn prephaser(&self) -> Result<Trapezoid> {
        let p = &self.params;
        Trapezoid::new(
            p.prephase_start,
            p.prephase_start + p.prephase_ramp_time,
            p.prephase_start + p.prephase_ramp_time + p.prephase_flat_time
        )
    }
}

impl DiagramSource for GradientEcho {
    fn name(&self) -> String {
        self.params.name.clone()
    }

    fn sequence(&self) -> Result<Sequence> {
        let p = &self.params;
        let t = TimeAxis::linspace(p.t_start,p.t_end,p.n_time_points)?;

        let rf = Channel::new(&t)
            .with_element(&SincPulse::new(p.rf_start,p.rf_duration,p.side_lobes)?,1.0)?;

        let adc = Channel::new(&t)
            .with_element(&Rect::new(p.adc_start,p.adc_duration)?,1.0)?;

        let phase_table = Array1::linspace(-1.0,1.0,p.n_phase_steps);
        let phase = Channel::new(&t)
            .with_element(&self.prephaser()?,phase_table)?;

        let readout = Trapezoid::new(
            p.readout_start,
            p.readout_start + p.readout_ramp_time,
            p.readout_start + p.readout_ramp_time + p.readout_flat_time
        )?;
        let freq = Channel::new(&t)
            .with_element(&self.prephaser()?,-1.0)?
            .with_element(&readout,p.readout_amplitude)?;

        // the slice gradient is on while the rf pulse plays out
        let slice_select = Trapezoid::new(
            p.rf_start - p.slice_ramp_time,
            p.rf_start,
            p.rf_start + p.slice_flat_time
        )?;
        let slice = Channel::new(&t)
            .with_element(&slice_select,1.0)?
            .with_element(&self.prephaser()?,-1.0)?;

        Sequence::new()
            .with_channel("rf",rf)?
            .with_channel("adc",adc)?
            .with_channel("phase",phase)?
            .with_channel("slice",slice)?
            .with_channel("freq",freq)
    }

    fn axis_map(&self) -> AxisMap {
        AxisMap::new()
            .axis("RF/ADC",&["rf","adc"])
            .axis("Phase\nEncoding",&["phase"])
            .axis("Slice\nSelection",&["slice"])
            .axis("Frequency\nEncoding",&["freq"])
    }

    fn annotate(&self,diagram:&mut Diagram) -> Result<()> {
        let excitation = self.excitation_center();
        let echo = self.echo_center();
        diagram
            .add_vline(AxisSelection::All,echo,LineSpec::default())?
            .add_vline(AxisSelection::All,excitation,LineSpec::default())?
            .add_label(0,excitation,-0.6,"90° Excitation Pulse")?
            .add_label(0,echo,0.3,"Data Sampling")?
            .add_hline(0,(excitation,echo),1.4,Some("Echo-Time (TE)"),ArrowStyle::Both)?;
        if let Some((lo,hi)) = self.params.rf_axis_limits {
            diagram.set_ylim(0,lo,hi)?;
        }
        Ok(())
    }
}

/*
 An element shape is a unit-amplitude waveform evaluated on a time grid. Samples outside of the
 element's support are NaN, which marks "no event" for the channel the element is added to.

 Shapes start and end at zero where the grid allows it, so filled areas close down onto the
 time axis.
 */

use std::f64::consts::PI;
use ndarray::{Array1, ArrayView1};
use crate::error::{DiagramError, Result};

pub trait Shape {
    fn name(&self) -> &str;
    fn render(&self,t:ArrayView1<f64>) -> Array1<f64>;
}

fn check_positive(shape:&'static str,label:&str,value:f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DiagramError::invalid_shape(shape,format!("{} must be positive, got {}",label,value)))
    }
    Ok(())
}

fn check_finite(shape:&'static str,label:&str,value:f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DiagramError::invalid_shape(shape,format!("{} must be finite, got {}",label,value)))
    }
    Ok(())
}

/// Sinc shaped RF pulse with a given number of side lobes on each side of the main lobe.
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct SincPulse {
    pub t_start:f64,
    pub duration:f64,
    pub side_lobes:u16,
}

impl SincPulse {
    pub fn new(t_start:f64,duration:f64,side_lobes:u16) -> Result<SincPulse> {
        check_finite("sinc pulse","start time",t_start)?;
        check_positive("sinc pulse","duration",duration)?;
        Ok(SincPulse{t_start,duration,side_lobes})
    }
    fn angular_freq(&self) -> f64 {
        2.0*PI*(self.side_lobes as f64 + 1.0)/self.duration
    }
}

impl Shape for SincPulse {
    fn name(&self) -> &str {
        "rf_sinc"
    }
    fn render(&self,t:ArrayView1<f64>) -> Array1<f64> {
        let t_end = self.t_start + self.duration;
        let center = self.t_start + 0.5*self.duration;
        let w = self.angular_freq();
        let raw:Vec<f64> = t.iter().map(|&ti| {
            if ti < self.t_start || ti > t_end {
                return f64::NAN
            }
            let tc = ti - center;
            match tc == 0.0 {
                true => w,
                false => (w*tc).sin()/tc
            }
        }).collect();
        Array1::from(utils::normalize(&raw))
    }
}

/// Rectangular window, used for ADC readouts. The first and last samples of the window are held
/// at zero so the box edges are visible.
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Rect {
    pub t_start:f64,
    pub duration:f64,
}

impl Rect {
    pub fn new(t_start:f64,duration:f64) -> Result<Rect> {
        check_finite("rect","start time",t_start)?;
        check_positive("rect","duration",duration)?;
        Ok(Rect{t_start,duration})
    }
}

impl Shape for Rect {
    fn name(&self) -> &str {
        "rect"
    }
    fn render(&self,t:ArrayView1<f64>) -> Array1<f64> {
        let t_end = self.t_start + self.duration;
        let mut y = t.mapv(|ti| if ti >= self.t_start && ti <= t_end {1.0} else {f64::NAN});
        let first = y.iter().position(|v| !v.is_nan());
        let last = y.iter().rposition(|v| !v.is_nan());
        if let (Some(first),Some(last)) = (first,last) {
            y[first] = 0.0;
            y[last] = 0.0;
        }
        y
    }
}

/// Symmetric gradient trapezoid of unit height.
///
/// The gradient starts ramping up at `t_start`, is fully on from `t_flat_out` and starts to ramp
/// down at `t_ramp_down`. The ramp down lasts as long as the ramp up.
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct Trapezoid {
    pub t_start:f64,
    pub t_flat_out:f64,
    pub t_ramp_down:f64,
}

impl Trapezoid {
    pub fn new(t_start:f64,t_flat_out:f64,t_ramp_down:f64) -> Result<Trapezoid> {
        check_finite("trapezoid","start time",t_start)?;
        check_finite("trapezoid","flat top time",t_flat_out)?;
        check_finite("trapezoid","ramp down time",t_ramp_down)?;
        if t_flat_out <= t_start {
            return Err(DiagramError::invalid_shape("trapezoid","ramp up must take a positive amount of time"))
        }
        if t_ramp_down < t_flat_out {
            return Err(DiagramError::invalid_shape("trapezoid","ramp down cannot start before the flat top"))
        }
        Ok(Trapezoid{t_start,t_flat_out,t_ramp_down})
    }
    pub fn ramp_time(&self) -> f64 {
        self.t_flat_out - self.t_start
    }
    pub fn t_end(&self) -> f64 {
        self.t_ramp_down + self.ramp_time()
    }
}

impl Shape for Trapezoid {
    fn name(&self) -> &str {
        "trapezoid"
    }
    fn render(&self,t:ArrayView1<f64>) -> Array1<f64> {
        let ramp = self.ramp_time();
        let t_end = self.t_end();
        t.mapv(|ti| {
            if ti < self.t_start || ti > t_end {
                f64::NAN
            }
            else if ti <= self.t_flat_out {
                (ti - self.t_start)/ramp
            }
            else if ti <= self.t_ramp_down {
                1.0
            }
            else {
                (self.t_ramp_down - ti)/ramp + 1.0
            }
        })
    }
}

/// Single positive half period of a sine.
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct HalfSin {
    pub t_start:f64,
    pub duration:f64,
}

impl HalfSin {
    pub fn new(t_start:f64,duration:f64) -> Result<HalfSin> {
        check_finite("half sine","start time",t_start)?;
        check_positive("half sine","duration",duration)?;
        Ok(HalfSin{t_start,duration})
    }
}

impl Shape for HalfSin {
    fn name(&self) -> &str {
        "half_sin"
    }
    fn render(&self,t:ArrayView1<f64>) -> Array1<f64> {
        let t_end = self.t_start + self.duration;
        t.mapv(|ti| {
            if ti < self.t_start || ti > t_end {
                f64::NAN
            } else {
                (PI*(ti - self.t_start)/self.duration).sin()
            }
        })
    }
}

/// User supplied waveform. The closure receives the time grid and must return one value per
/// time point.
pub struct Custom<F> {
    name:String,
    f:F,
}

impl<F> Custom<F> where F:Fn(ArrayView1<f64>) -> Array1<f64> {
    pub fn new(name:&str,f:F) -> Self {
        Self {
            name:name.to_string(),
            f
        }
    }
}

impl<F> Shape for Custom<F> where F:Fn(ArrayView1<f64>) -> Array1<f64> {
    fn name(&self) -> &str {
        &self.name
    }
    fn render(&self,t:ArrayView1<f64>) -> Array1<f64> {
        (self.f)(t)
    }
}

impl<F> std::fmt::Debug for Custom<F> {
    fn fmt(&self,f:&mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custom").field("name",&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn grid() -> Array1<f64> {
        // steps of 1/8 keep every sample exact
        Array1::linspace(0.0,4.0,33)
    }

    fn close(a:f64,b:f64) -> bool {
        (a - b).abs() < 1E-9
    }

    #[test]
    fn trapezoid_ramps_and_plateau(){
        let t = grid();
        let trap = Trapezoid::new(0.5,1.0,2.0).unwrap();
        let y = trap.render(t.view());
        assert!(y[3].is_nan());
        assert!(close(y[4],0.0));
        assert!(close(y[6],0.5));
        assert!(close(y[8],1.0));
        assert!(close(y[12],1.0));
        assert!(close(y[16],1.0));
        assert!(close(y[18],0.5));
        assert!(close(y[20],0.0));
        assert!(y[21].is_nan());
        assert_eq!(trap.t_end(),2.5);
    }

    #[test]
    fn trapezoid_rejects_bad_timing(){
        assert!(Trapezoid::new(1.0,1.0,2.0).is_err());
        assert!(Trapezoid::new(0.0,1.0,0.5).is_err());
        assert!(Trapezoid::new(f64::NAN,1.0,2.0).is_err());
        // triangle: no plateau
        assert!(Trapezoid::new(0.0,1.0,1.0).is_ok());
    }

    #[test]
    fn rect_edges_drop_to_zero(){
        let t = grid();
        let y = Rect::new(1.0,1.0).unwrap().render(t.view());
        assert!(y[7].is_nan());
        assert_eq!(y[8],0.0);
        assert_eq!(y[9],1.0);
        assert_eq!(y[15],1.0);
        assert_eq!(y[16],0.0);
        assert!(y[17].is_nan());
    }

    #[test]
    fn rect_outside_of_grid_is_empty(){
        let t = grid();
        let y = Rect::new(10.0,1.0).unwrap().render(t.view());
        assert!(y.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sinc_is_normalized_and_closes_at_its_ends(){
        let t = Array1::linspace(0.0,1.0,129);
        let y = SincPulse::new(0.25,0.5,2).unwrap().render(t.view());
        let peak = y.iter().filter(|v| !v.is_nan()).fold(f64::MIN,|a,b| a.max(*b));
        assert!(close(peak,1.0));
        // center of the pulse sits on a grid point
        assert!(close(y[64],1.0));
        assert!(y[32].abs() < 1E-9);
        assert!(y[96].abs() < 1E-9);
        assert!(y[31].is_nan());
        assert!(y[97].is_nan());
        // first side lobe is negative
        assert!(y.iter().any(|v| *v < -0.1));
    }

    #[test]
    fn half_sin_peaks_in_the_middle(){
        let t = grid();
        let y = HalfSin::new(1.0,1.0).unwrap().render(t.view());
        assert!(close(y[8],0.0));
        assert!(close(y[12],1.0));
        assert!(y[16].abs() < 1E-9);
        assert!(HalfSin::new(0.0,-1.0).is_err());
    }

    #[test]
    fn custom_shapes_keep_their_name(){
        fn ramp(t:ArrayView1<f64>) -> Array1<f64> {
            t.mapv(|v| v/4.0)
        }
        let c = Custom::new("ramp",ramp);
        assert_eq!(c.name(),"ramp");
        let y = c.render(grid().view());
        assert!(close(y[32],1.0));
    }
}

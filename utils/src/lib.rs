use std::fs::File;
use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::Path;

/// read a whole file after forcing the extension onto the path
pub fn read_to_string(filepath:&Path,extension:&str) -> io::Result<String> {
    let p = filepath.with_extension(extension);
    let mut f = File::open(&p)?;
    let mut s = String::new();
    f.read_to_string(&mut s)?;
    Ok(s)
}

/// write a string to a file after forcing the extension onto the path
pub fn write_to_file(filepath:&Path,extension:&str,string:&str) -> io::Result<()> {
    let p = filepath.with_extension(extension);
    let mut f = File::create(p)?;
    f.write_all(string.as_bytes())
}

/// scale values so that the largest magnitude becomes 1. NaN entries are ignored and kept.
pub fn normalize(real:&[f64]) -> Vec<f64> {
    let abs_max = real.iter()
        .filter(|x| !x.is_nan())
        .fold(0.0_f64,|acc,x| acc.max(x.abs()));
    if abs_max == 0.0 {
        return real.to_vec()
    }
    real.iter().map(|x| x/abs_max).collect()
}

/// minimum and maximum of the non-NaN values. None if every value is NaN.
pub fn nan_min_max<I>(values:I) -> Option<(f64,f64)>
    where I:IntoIterator<Item=f64> {
    values.into_iter()
        .filter(|v| !v.is_nan())
        .fold(None,|acc,v| match acc {
            None => Some((v,v)),
            Some((lo,hi)) => Some((lo.min(v),hi.max(v)))
        })
}

/// index ranges of consecutive `true` entries
pub fn true_runs(mask:&[bool]) -> Vec<Range<usize>> {
    let mut runs = Vec::<Range<usize>>::new();
    let mut start:Option<usize> = None;
    for (i,flag) in mask.iter().enumerate() {
        match (flag,start) {
            (true,None) => start = Some(i),
            (false,Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _=> {}
        }
    }
    if let Some(s) = start {
        runs.push(s..mask.len());
    }
    runs
}

pub fn mean(a:f64,b:f64) -> f64 {
    0.5*(a + b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_cover_leading_and_trailing_blocks(){
        let mask = [true,true,false,false,true,false,true];
        assert_eq!(true_runs(&mask),vec![0..2,4..5,6..7]);
        assert!(true_runs(&[false,false]).is_empty());
        assert_eq!(true_runs(&[true,true,true]),vec![0..3]);
    }

    #[test]
    fn nan_min_max_skips_nan(){
        let v = vec![f64::NAN,-2.0,3.5,f64::NAN];
        assert_eq!(nan_min_max(v),Some((-2.0,3.5)));
        assert_eq!(nan_min_max(vec![f64::NAN,f64::NAN]),None);
    }

    #[test]
    fn normalize_uses_largest_magnitude(){
        let n = normalize(&[1.0,-4.0,f64::NAN,2.0]);
        assert_eq!(n[0],0.25);
        assert_eq!(n[1],-1.0);
        assert!(n[2].is_nan());
        assert_eq!(normalize(&[0.0,0.0]),vec![0.0,0.0]);
    }

    #[test]
    fn files_get_the_requested_extension(){
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("settings");
        write_to_file(&base,"toml","alpha = 0.5\n").unwrap();
        assert!(dir.path().join("settings.toml").exists());
        assert_eq!(read_to_string(&base,"toml").unwrap(),"alpha = 0.5\n");
        assert!(read_to_string(&base,"missing").is_err());
    }
}

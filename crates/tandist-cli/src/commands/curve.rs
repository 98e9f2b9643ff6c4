//! Print the static transfer curve.

use clap::Args;
use tandist_core::{GAIN_DESCRIPTOR, quadratic_gain, shape};

/// Print the static transfer curve.
#[derive(Args)]
pub struct CurveArgs {
    /// Gain (clamped to 1.0..10.0)
    #[arg(short, long, default_value = "1.0")]
    gain: f32,

    /// Number of points across -1.0..=1.0
    #[arg(short, long, default_value = "21")]
    points: usize,
}

/// Run the curve command.
pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    let gain = GAIN_DESCRIPTOR.clamp(args.gain);
    println!("# tanh(x * {gain}²)");
    println!("x\ty");
    for (x, y) in curve(gain, args.points) {
        println!("{x:.4}\t{y:.6}");
    }
    Ok(())
}

/// `points` evenly spaced samples of the curve, endpoints included.
fn curve(gain: f32, points: usize) -> Vec<(f32, f32)> {
    let drive = quadratic_gain(gain);
    match points {
        0 => Vec::new(),
        1 => vec![(0.0, shape(0.0, drive))],
        n => (0..n)
            .map(|i| {
                let x = -1.0 + 2.0 * i as f32 / (n - 1) as f32;
                (x, shape(x, drive))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_center() {
        let c = curve(1.0, 3);
        assert_eq!(c.len(), 3);
        assert_eq!(c[0].0, -1.0);
        assert_eq!(c[1], (0.0, 0.0));
        assert!((c[2].1 - 0.76159).abs() < 1e-5);
        assert_eq!(c[0].1, -c[2].1);
    }

    #[test]
    fn degenerate_point_counts() {
        assert!(curve(2.0, 0).is_empty());
        assert_eq!(curve(2.0, 1), vec![(0.0, 0.0)]);
    }

    #[test]
    fn higher_gain_saturates_harder() {
        let soft = curve(1.0, 11);
        let hard = curve(3.0, 11);
        for (s, h) in soft.iter().zip(&hard).filter(|(s, _)| s.0 > 0.0) {
            assert!(h.1 > s.1);
        }
    }
}

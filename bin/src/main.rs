#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod app;

use app::*;
use scattering::geometry::*;
use scattering::pbrt::*;
use scattering::reflection::*;
use scattering::rng::*;
use scattering::sampling::*;
use scattering::spectrum::*;

/// Cosines of the outgoing directions reflectance is estimated for.
const COS_THETA_O: [Float; 5] = [1.0, 0.75, 0.5, 0.25, 0.1];

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run(&OPTIONS) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    let bxdf = options.bxdf()?;
    let n = options.samples_per_axis();
    let mut rng = RNG::new(options.seed);
    let mut non_finite = 0_usize;

    info!("Testing {bxdf} with {n}x{n} samples");
    println!("{bxdf}");

    for cos_theta in COS_THETA_O {
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let wo = Vector3f::new(sin_theta, 0.0, cos_theta);
        let samples = stratified_sample_2d(&mut rng, n, n, true);
        let rho = bxdf.rho_hd(&wo, &samples);
        if !rho.is_finite() {
            non_finite += 1;
        }
        println!("rho_hd(cos_theta_o = {cos_theta:.2}) = {rho}");
    }

    let samples1 = stratified_sample_2d(&mut rng, n, n, true);
    let mut samples2 = stratified_sample_2d(&mut rng, n, n, true);
    rng.shuffle(&mut samples2);
    let rho = bxdf.rho_hh(&samples1, &samples2);
    if !rho.is_finite() {
        non_finite += 1;
    }
    println!("rho_hh = {rho}");

    let mut max_pdf_error: Float = 0.0;
    let mut max_reciprocity_error: Float = 0.0;
    let mut failed = 0_usize;
    for u in samples1.iter() {
        let wo = uniform_sample_hemisphere(&rng.uniform_point2f());
        let Some(s) = bxdf.sample_f(&wo, u) else {
            failed += 1;
            continue;
        };
        if !s.f.is_finite() || !s.pdf.is_finite() {
            non_finite += 1;
            continue;
        }

        let pdf = bxdf.pdf(&wo, &s.wi);
        max_pdf_error = max(max_pdf_error, relative_error(s.pdf, pdf));

        if !s.bxdf_type.is_specular() {
            let f = bxdf.f(&wo, &s.wi);
            let f_swapped = bxdf.f(&s.wi, &wo);
            max_reciprocity_error = max(max_reciprocity_error, spectrum_error(&f, &f_swapped));
        }
    }
    debug!("{failed} of {} samples produced no direction", samples1.len());

    println!("failed samples = {failed}/{}", samples1.len());
    println!("max sample/pdf relative difference = {max_pdf_error}");
    println!("max reciprocity relative difference = {max_reciprocity_error}");

    if non_finite > 0 {
        Err(format!("{non_finite} non-finite values produced by {bxdf}"))
    } else {
        Ok(())
    }
}

fn relative_error(a: Float, b: Float) -> Float {
    let scale = max(a.abs(), b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

fn spectrum_error(a: &Spectrum, b: &Spectrum) -> Float {
    a.samples()
        .iter()
        .zip(b.samples().iter())
        .fold(0.0, |e, (x, y)| max(e, relative_error(*x, *y)))
}

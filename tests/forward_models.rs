use std::fs;
use std::path::Path;

use float_eq::assert_float_eq;
use rayon::prelude::*;
use rstest::rstest;
use tempfile::tempdir;

use petkin::{AifOperators, Extrapolation, KineticModel, ModelOptions, ModelRegistry};
use petkin::config::model::read_config_file;

fn times(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

fn assert_send_sync<T: Send + Sync + ?Sized>() {}

#[test]
fn models_can_be_shared_between_threads() {
    assert_send_sync::<dyn KineticModel>();
    assert_send_sync::<AifOperators>();
}

// A constant AIF switched on at t = 0 gives the closed-form one-tissue response
//
//   C_T(t) = K1 c (1 - exp(-k2 t)) / k2
//
// The rectangle rule overestimates this by at most about 1.5 K1 c dt.
#[test]
fn finely_sampled_step_input_approaches_the_closed_form() {
    let (c, k1, k2, dt) = (2.0, 0.1, 0.05, 0.01);
    let aif_time = times(0.0, dt, 6001);
    let pet_time = times(0.0, 5.0, 13);
    let aif = AifOperators::new(&vec![c; aif_time.len()], Some(&aif_time), &pet_time, Extrapolation::Linear).unwrap();
    let model = ModelRegistry::default().create("pet_1TCM", &ModelOptions::default(), aif).unwrap();

    let curve = model.evaluate(&[0.0, k1, k2]);
    for (&t, &predicted) in pet_time.iter().zip(&curve) {
        let exact = k1 * c * (1.0 - (-k2 * t).exp()) / k2;
        assert_float_eq!(predicted, exact, abs <= 2.0 * k1 * c * dt);
    }
}

#[rstest(model, case("pet_1TCM"), case("pet_2TCM"), case("pet_2TCM_IR"))]
fn parallel_evaluation_matches_sequential(model: &str) {
    let aif_time = times(0.0, 0.5, 121);
    let aif: Vec<f64> = aif_time.iter().map(|t| t * (-t / 8.0).exp()).collect();
    let pet_time = times(2.0, 4.0, 15);
    let aif = AifOperators::new(&aif, Some(&aif_time), &pet_time, Extrapolation::Clamp).unwrap();
    let model = ModelRegistry::default().create(model, &ModelOptions::default(), aif).unwrap();

    let seed = model.layout().initial_means().to_vec();
    let vectors: Vec<Vec<f64>> = (1..=64)
        .map(|i| seed.iter().enumerate().map(|(j, p)| if j == 0 { *p } else { p * (1.0 + 0.01 * i as f64) }).collect())
        .collect();

    let sequential: Vec<_> = vectors.iter().map(|p| model.evaluate(p)).collect();
    let parallel  : Vec<_> = vectors.par_iter().map(|p| model.evaluate(p)).collect();
    assert_eq!(sequential, parallel);
    for curve in &sequential {
        assert_eq!(curve.len(), 15);
        assert!(curve.iter().all(|v| v.is_finite()));
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn irreversible_model_from_files_on_disk() {
    let dir = tempdir().unwrap();
    write(dir.path(), "aif.txt"     , "# Bq/mL\n0\n50\n40\n25\n15\n10\n8\n");
    write(dir.path(), "aif_time.txt", "0 2 4 8 16 32 64\n");
    write(dir.path(), "pet_time.txt", "0 10 20 40 60\n");
    write(dir.path(), "model.toml"  , r#"
        model     = "pet_2TCM_IR"
        aif-data  = "aif.txt"
        aif-time  = "aif_time.txt"
        time-data = "pet_time.txt"
        extrapolation = "error"
        ca = 100.0

        [init]
        Ki = 0.002
    "#);

    let config = read_config_file(&dir.path().join("model.toml")).unwrap();
    let model = config.build(&ModelRegistry::default()).unwrap();
    assert_eq!(model.layout().names(), vec!["vB", "K1", "Ki", "k-sum"]);
    assert_eq!(model.aif().step(), 2.0);
    assert_eq!(model.outputs(), vec!["CMRglc"]);

    let params = model.layout().initial_means();
    let params = params.as_slice().unwrap();
    assert_eq!(params, &[0.03, 0.05, 0.002, 0.05]);

    let curve = model.evaluate_model(params, "").unwrap();
    assert_eq!(curve.len(), 5);
    assert_eq!(curve[0], 0.0);
    assert!(curve.iter().skip(1).all(|&v| v > 0.0));

    let cmrglc = model.evaluate_model(params, "CMRglc").unwrap();
    assert_float_eq!(cmrglc[0], 0.002 * 6000.0 / 1.05 * 100.0 / 18.0156 / 0.81, r2nd <= 1e-12);
}

#[test]
fn pet_frames_beyond_the_aif_are_refused_on_request() {
    let dir = tempdir().unwrap();
    write(dir.path(), "aif.txt"     , "0 5 3");
    write(dir.path(), "aif_time.txt", "0 1 2");
    write(dir.path(), "pet_time.txt", "0 1 2 3");
    write(dir.path(), "model.toml"  , r#"
        model         = "pet_1TCM"
        aif-data      = "aif.txt"
        aif-time      = "aif_time.txt"
        time-data     = "pet_time.txt"
        extrapolation = "error"
    "#);
    let result = read_config_file(&dir.path().join("model.toml")).unwrap().build(&ModelRegistry::default());
    assert!(matches!(result, Err(petkin::Error::OutOfRange { .. })));
}

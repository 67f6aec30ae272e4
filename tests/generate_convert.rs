//! End-to-end generation and hex conversion through temporary directories

use glorot_init::{convert_to_hex, generate_init_file, GlorotConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

/// Build the default configuration rooted in a temp directory
fn temp_config(root: &std::path::Path) -> GlorotConfig {
    let mut config = GlorotConfig::default();
    config.output.binary_dir = root.join("gaussian_list");
    config.output.decimal_dir = root.join("dnn-hlsims/network_models/wtbias_initdata");
    config
}

#[test]
fn full_pipeline_for_default_layer_zero() {
    // fi=128, fo=8, int_bits=2, frac_bits=7, numentries=2000
    let dir = tempdir().unwrap();
    let config = temp_config(dir.path());
    config.validate().unwrap();
    let format = config.format();
    let mut rng = StdRng::seed_from_u64(136);

    let summary = generate_init_file(
        &mut rng,
        config.generation.fan_in[0],
        config.generation.fan_out[0],
        format,
        config.generation.numentries,
        &config.binary_path(0),
        &config.decimal_path(0),
    )
    .unwrap();

    assert_eq!(summary.written, 2000);
    assert_eq!(summary.sigma, (2.0 / 136.0_f64).sqrt());

    let binary = fs::read_to_string(config.binary_path(0)).unwrap();
    let decimal = fs::read_to_string(config.decimal_path(0)).unwrap();
    assert_eq!(binary.lines().count(), 2000);
    assert_eq!(decimal.lines().count(), 2000);

    // Records are parallel: each bit string decodes to within one quantum of
    // its decimal line, never past it (round-toward-zero)
    for (bits, text) in binary.lines().zip(decimal.lines()) {
        assert_eq!(bits.len(), 10);
        assert!(bits.chars().all(|c| c == '0' || c == '1'));

        let value: f64 = text.parse().unwrap();
        assert!(value >= format.min_value());
        assert!(value <= format.max_value());

        let decoded = format.decode(bits).unwrap();
        assert!((decoded - value).abs() < format.quantum());
        assert!(decoded.abs() <= value.abs());
    }

    let records = convert_to_hex(&config.binary_path(0), &config.hex_path(0)).unwrap();
    assert_eq!(records, 2000);

    let hex = fs::read_to_string(config.hex_path(0)).unwrap();
    assert!(!hex.contains('\n'));
    assert!(hex.ends_with(','));
    let groups: Vec<&str> = hex.trim_end_matches(',').split(',').collect();
    assert_eq!(groups.len(), 2000);
    // Width 10 pads to 12 bits, so every group is exactly three hex digits
    for group in &groups {
        assert_eq!(group.len(), 3);
        assert!(group.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}

#[test]
fn hex_groups_round_trip_to_original_records() {
    let dir = tempdir().unwrap();
    let config = temp_config(dir.path());
    let mut rng = StdRng::seed_from_u64(9);

    generate_init_file(
        &mut rng,
        config.generation.fan_in[1],
        config.generation.fan_out[1],
        config.format(),
        250,
        &config.binary_path(1),
        &config.decimal_path(1),
    )
    .unwrap();
    convert_to_hex(&config.binary_path(1), &config.hex_path(1)).unwrap();

    let binary = fs::read_to_string(config.binary_path(1)).unwrap();
    let hex = fs::read_to_string(config.hex_path(1)).unwrap();

    for (bits, group) in binary.lines().zip(hex.trim_end_matches(',').split(',')) {
        // Expand each hex digit back to four bits and strip the pad added
        // beyond the original width
        let expanded: String = group
            .chars()
            .map(|c| format!("{:04b}", c.to_digit(16).unwrap()))
            .collect();
        let pad = expanded.len() - bits.len();
        assert!(expanded[..pad].chars().all(|c| c == '0'));
        assert_eq!(&expanded[pad..], bits);
    }
}

#[test]
fn saturation_pins_the_asymmetric_limits() {
    // int_bits=0 spans [-1, 1 - 2^-7]; fi+fo=2 gives sigma=1, so roughly a
    // third of 5000 draws saturate. Clamped values must land exactly on the
    // asymmetric limits: the positive one excludes the top quantum, the
    // negative one does not.
    let dir = tempdir().unwrap();
    let mut config = temp_config(dir.path());
    config.quantization.int_bits = 0;
    let format = config.format();
    let mut rng = StdRng::seed_from_u64(42);

    generate_init_file(
        &mut rng,
        1,
        1,
        format,
        5000,
        &config.output.binary_dir.join("sat.dat"),
        &config.output.decimal_dir.join("sat_DEC.dat"),
    )
    .unwrap();

    let decimal = fs::read_to_string(config.output.decimal_dir.join("sat_DEC.dat")).unwrap();
    let values: Vec<f64> = decimal.lines().map(|l| l.parse().unwrap()).collect();

    let pos_limit = 1.0 - 1.0 / 128.0;
    let neg_limit = -1.0;
    for value in &values {
        assert!(*value <= pos_limit);
        assert!(*value >= neg_limit);
    }
    assert!(values.iter().any(|v| *v == pos_limit));
    assert!(values.iter().any(|v| *v == neg_limit));
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = tempdir().unwrap();
    let config = temp_config(dir.path());

    for name in ["a.dat", "b.dat"] {
        let mut rng = StdRng::seed_from_u64(77);
        generate_init_file(
            &mut rng,
            128,
            8,
            config.format(),
            100,
            &config.output.binary_dir.join(name),
            &config.output.decimal_dir.join(name),
        )
        .unwrap();
    }

    let first = fs::read_to_string(config.output.binary_dir.join("a.dat")).unwrap();
    let second = fs::read_to_string(config.output.binary_dir.join("b.dat")).unwrap();
    assert_eq!(first, second);
}

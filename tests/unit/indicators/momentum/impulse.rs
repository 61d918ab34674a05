//! Unit tests for momentum and volume impulse

use sentiscore::indicators::momentum::{calculate_impulse, calculate_momentum, calculate_volume_zscore};

#[test]
fn test_momentum_uses_shifted_windows() {
    // sma_prev over closes[-15..=-2] = 100, sma_now over closes[-14..] = 100 + 14/14
    let mut closes = vec![100.0; 15];
    closes[14] = 114.0;
    let momentum = calculate_momentum(&closes).unwrap();
    assert!((momentum - 0.01).abs() < 1e-12);
}

#[test]
fn test_momentum_ignores_older_history() {
    let mut long = vec![1.0; 10];
    long.extend(vec![100.0; 15]);
    let short = vec![100.0; 15];
    assert_eq!(calculate_momentum(&long).unwrap(), calculate_momentum(&short).unwrap());
}

#[test]
fn test_momentum_zero_base_is_finite() {
    let mut closes = vec![0.0; 15];
    closes[14] = 1.0;
    assert!(calculate_momentum(&closes).unwrap().is_finite());
}

#[test]
fn test_flat_volume_zscore_is_zero() {
    assert_eq!(calculate_volume_zscore(&[500.0; 20]).unwrap(), 0.0);
}

#[test]
fn test_volume_zscore_population_std() {
    // Last 14 volumes: seven 1s and seven 3s -> mean 2, population std 1.
    let mut volumes = vec![0.0];
    for _ in 0..7 {
        volumes.push(1.0);
        volumes.push(3.0);
    }
    let z = calculate_volume_zscore(&volumes).unwrap();
    assert!((z - 1.0).abs() < 1e-12);
}

#[test]
fn test_impulse_combination() {
    let mut closes = vec![100.0; 15];
    closes[14] = 114.0;
    let impulse = calculate_impulse(&closes, &[10.0; 15]).unwrap();
    assert_eq!(impulse.window, 14);
    assert!((impulse.value - 0.005).abs() < 1e-12);
}

#[test]
fn test_impulse_insufficient_data() {
    assert!(calculate_impulse(&[1.0; 14], &[1.0; 15]).is_err());
    assert!(calculate_impulse(&[1.0; 15], &[1.0; 14]).is_err());
}

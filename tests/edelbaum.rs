use std::f64::consts::{FRAC_PI_2, PI};

use edelbaum_transfer::lowthrust::{
    EdelbaumInputs, GuidanceError, InputError, SingularityError, compute_parameters, edelbaum_ai,
    plan_transfer, yaw_angle,
};

const MU_EARTH: f64 = 398_600.441_8; // km^3 / s^2

fn inputs(a_0: f64, a_f: f64, inc_0: f64, inc_f: f64, f: f64) -> EdelbaumInputs {
    EdelbaumInputs {
        mu_km3_s2: MU_EARTH,
        initial_semimajor_axis_km: a_0,
        final_semimajor_axis_km: a_f,
        initial_inclination_rad: inc_0,
        final_inclination_rad: inc_f,
        acceleration_km_s2: f,
    }
}

fn edelbaum_closed_form(v_0: f64, v_f: f64, delta_inc: f64) -> f64 {
    (v_0 * v_0 + v_f * v_f - 2.0 * v_0 * v_f * (FRAC_PI_2 * delta_inc).cos()).sqrt()
}

#[test]
fn identical_orbits_need_no_delta_v() {
    let (law, delta_v, t_f) = edelbaum_ai(MU_EARTH, 7000.0, 7000.0, 0.0, 0.0, 1e-6).unwrap();
    assert_eq!(law.initial_yaw_rad(), 0.0);
    assert!(delta_v.abs() < 1e-12, "delta_v = {delta_v}");
    assert!(t_f.abs() < 1e-6, "t_f = {t_f}");
}

#[test]
fn coplanar_raise_reduces_to_speed_difference() {
    let transfer = plan_transfer(&inputs(7000.0, 42_000.0, 0.3, 0.3, 1e-6)).unwrap();
    let p = transfer.parameters;
    assert_eq!(p.initial_yaw_rad, 0.0);
    assert_eq!(p.delta_inclination_rad, 0.0);
    let expected = (p.initial_velocity_km_s - p.final_velocity_km_s).abs();
    assert!((transfer.delta_v_km_s - expected).abs() < 1e-12);
    assert!(transfer.delta_v_km_s.is_finite());
}

#[test]
fn coplanar_lowering_thrusts_retrograde() {
    let transfer = plan_transfer(&inputs(42_000.0, 7000.0, 0.0, 0.0, 1e-6)).unwrap();
    let p = transfer.parameters;
    assert!((p.initial_yaw_rad - PI).abs() < 1e-15);
    let expected = (p.initial_velocity_km_s - p.final_velocity_km_s).abs();
    assert!((transfer.delta_v_km_s - expected).abs() < 1e-12);
}

#[test]
fn leo_to_geo_scenario_is_finite_and_pure() {
    let (k, a_0, a_f, inc_0, inc_f, f) = (398_600.441_8, 7000.0, 42_000.0, 0.5, 0.0, 1e-6);
    let (law_a, dv_a, tf_a) = edelbaum_ai(k, a_0, a_f, inc_0, inc_f, f).unwrap();
    let (law_b, dv_b, tf_b) = edelbaum_ai(k, a_0, a_f, inc_0, inc_f, f).unwrap();

    assert!(dv_a.is_finite() && dv_a > 0.0);
    assert_eq!(tf_a.to_bits(), (dv_a / f).to_bits());
    assert_eq!(dv_a.to_bits(), dv_b.to_bits());
    assert_eq!(tf_a.to_bits(), tf_b.to_bits());
    assert_eq!(law_a, law_b);

    // Roughly 5.79 km/s for a 28.6 deg plane change combined with LEO -> GEO.
    assert!((dv_a - 5.792_874_642_848_905).abs() < 1e-9, "dv = {dv_a}");
}

#[test]
fn delta_v_matches_edelbaum_closed_form() {
    let cases = [
        (7000.0, 42_000.0, 0.5, 0.0),
        (42_000.0, 7000.0, 0.0, 0.5),
        (7000.0, 7000.0, 0.5, 0.6),
        (6778.0, 26_560.0, 0.9, 0.96),
        (42_166.0, 42_466.0, 0.1_f64.to_radians(), 0.0),
    ];
    for (a_0, a_f, inc_0, inc_f) in cases {
        let transfer = plan_transfer(&inputs(a_0, a_f, inc_0, inc_f, 1e-6)).unwrap();
        let p = transfer.parameters;
        let expected = edelbaum_closed_form(
            p.initial_velocity_km_s,
            p.final_velocity_km_s,
            p.delta_inclination_rad,
        );
        let rel = (transfer.delta_v_km_s - expected).abs() / expected;
        assert!(rel < 1e-9, "a_0={a_0} a_f={a_f}: {} vs {expected}", transfer.delta_v_km_s);
    }
}

#[test]
fn swapping_endpoints_keeps_delta_v_and_mirrors_yaw() {
    let forward = plan_transfer(&inputs(7000.0, 42_000.0, 0.5, 0.0, 1e-6)).unwrap();
    let reverse = plan_transfer(&inputs(42_000.0, 7000.0, 0.0, 0.5, 1e-6)).unwrap();

    let rel = (forward.delta_v_km_s - reverse.delta_v_km_s).abs() / forward.delta_v_km_s;
    assert!(rel < 1e-12);

    // The reverse yaw history is the forward one run backwards and reflected about pi/2.
    let t_f = forward.time_of_flight_s;
    for i in 0..=20 {
        let t = t_f * i as f64 / 20.0;
        let sum = reverse.guidance.yaw_angle(t) + forward.guidance.yaw_angle(t_f - t);
        assert!((sum - PI).abs() < 1e-9, "t={t}: sum={sum}");
    }
}

#[test]
fn initial_yaw_is_recovered_at_arc_start() {
    let cases = [
        (7.5, 0.385, 1e-6),
        (3.08, 1.97, 3.5e-7),
        (7.5, PI, 1e-3),
        (1.0, 0.0, 10.0),
        (4.2, -0.7, 2e-5),
    ];
    for (v_0, beta_0, f) in cases {
        assert_eq!(yaw_angle(0.0, v_0, beta_0, f), beta_0);
    }

    let transfer = plan_transfer(&inputs(7000.0, 42_000.0, 0.5, 0.0, 1e-6)).unwrap();
    assert_eq!(
        transfer.guidance.yaw_angle(0.0),
        transfer.parameters.initial_yaw_rad
    );
}

#[test]
fn yaw_grows_monotonically_towards_final_value() {
    let transfer = plan_transfer(&inputs(7000.0, 42_000.0, 0.5, 0.0, 1e-6)).unwrap();
    let t_f = transfer.time_of_flight_s;
    let mut previous = transfer.guidance.yaw_angle(0.0);
    for i in 1..=100 {
        let beta = transfer.guidance.yaw_angle(t_f * i as f64 / 100.0);
        assert!(beta > previous);
        previous = beta;
    }
    let p = transfer.parameters;
    let expected_final = p.initial_yaw_rad + FRAC_PI_2 * p.delta_inclination_rad;
    assert!((previous - expected_final).abs() < 1e-9);
}

#[test]
fn parameters_follow_circular_velocity() {
    let p = compute_parameters(&inputs(7000.0, 42_000.0, 0.5, 0.0, 1e-6)).unwrap();
    assert!((p.initial_velocity_km_s - (MU_EARTH / 7000.0).sqrt()).abs() < 1e-15);
    assert!((p.final_velocity_km_s - (MU_EARTH / 42_000.0).sqrt()).abs() < 1e-15);
    assert_eq!(p.delta_inclination_rad, 0.5);
    assert!(p.initial_yaw_rad > 0.0 && p.initial_yaw_rad < FRAC_PI_2);
}

#[test]
fn rejects_out_of_domain_inputs() {
    let cases = [
        (
            EdelbaumInputs {
                mu_km3_s2: 0.0,
                ..inputs(7000.0, 42_000.0, 0.5, 0.0, 1e-6)
            },
            InputError::GravitationalParameter(0.0),
        ),
        (
            inputs(0.0, 42_000.0, 0.5, 0.0, 1e-6),
            InputError::InitialSemimajorAxis(0.0),
        ),
        (
            inputs(7000.0, -1.0, 0.5, 0.0, 1e-6),
            InputError::FinalSemimajorAxis(-1.0),
        ),
        (
            inputs(7000.0, 42_000.0, 0.5, 0.0, 0.0),
            InputError::Acceleration(0.0),
        ),
        (
            inputs(7000.0, 42_000.0, 0.5, 0.0, -1e-6),
            InputError::Acceleration(-1e-6),
        ),
    ];
    for (bad, expected) in cases {
        let err = plan_transfer(&bad).unwrap_err();
        assert_eq!(err, GuidanceError::InvalidInput(expected));
        assert!(err.is_invalid_input());
        assert!(!err.is_singularity());
    }

    let err = plan_transfer(&inputs(7000.0, 42_000.0, f64::NAN, 0.0, 1e-6)).unwrap_err();
    assert!(matches!(
        err,
        GuidanceError::InvalidInput(InputError::InitialInclination(_))
    ));
    let err = plan_transfer(&inputs(7000.0, f64::INFINITY, 0.5, 0.0, 1e-6)).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn vanishing_delta_v_denominator_is_reported() {
    // A lowering transfer with a vanishing plane change drives pi/2*di + beta_0 onto pi.
    let err = plan_transfer(&inputs(42_000.0, 7000.0, 0.0, 1e-14, 1e-6)).unwrap_err();
    assert!(err.is_singularity());
    assert!(matches!(
        err,
        GuidanceError::Singularity(SingularityError::DeltaV(_))
    ));
}

#[test]
fn near_coplanar_delta_v_is_accurate_or_reported() {
    let sweep = [
        1e-13, 1e-12, 1e-11, 1e-10, 1e-9, 1e-8, 1e-7, 1e-6, 1e-5, 1e-4, 1e-3, 1e-2,
    ];
    for (a_0, a_f) in [(7000.0, 42_000.0), (42_000.0, 7000.0)] {
        for di in sweep {
            let result = plan_transfer(&inputs(a_0, a_f, 0.3, 0.3 + di, 1e-6));
            let transfer = match result {
                Ok(transfer) => transfer,
                Err(err) => {
                    assert!(
                        matches!(err, GuidanceError::Singularity(SingularityError::DeltaV(_))),
                        "a_0={a_0} di={di}: {err}"
                    );
                    continue;
                }
            };
            let p = transfer.parameters;
            let expected = edelbaum_closed_form(
                p.initial_velocity_km_s,
                p.final_velocity_km_s,
                p.delta_inclination_rad,
            );
            let rel = (transfer.delta_v_km_s - expected).abs() / expected;
            assert!(rel < 1e-9, "a_0={a_0} di={di}: {} vs {expected}", transfer.delta_v_km_s);
        }
    }

    // Just above the reported band both directions agree with the coplanar value.
    let lowering = plan_transfer(&inputs(42_000.0, 7000.0, 0.3, 0.3 + 1e-12, 1e-6)).unwrap();
    let raising = plan_transfer(&inputs(7000.0, 42_000.0, 0.3, 0.3 + 1e-12, 1e-6)).unwrap();
    assert!((lowering.delta_v_km_s - raising.delta_v_km_s).abs() < 1e-12);
}

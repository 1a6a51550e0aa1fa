use ncss_units::{Quantity, UnitError, UnitRegistry};

fn registry() -> UnitRegistry {
    UnitRegistry::builder().define("tims = 1.5 * m = tims").build().expect("registry")
}

fn convert(reg: &UnitRegistry, magnitude: f64, unit: &str, to: &str) -> Result<Quantity, UnitError> {
    let source = magnitude * reg.parse_expression(unit)?;
    let target = reg.parse_units(to)?;
    reg.convert(&source, &target)
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!((actual - expected).abs() <= tolerance, "{actual} != {expected}");
}

#[test]
fn kilometers_to_meters() {
    let reg = registry();
    let converted = convert(&reg, 3.14, "km", "m").expect("km -> m");
    assert_eq!(converted.to_string(), "3140.0 meter");
}

#[test]
fn custom_unit_is_one_and_a_half_meters() {
    let reg = registry();
    assert_eq!(convert(&reg, 1.0, "tims", "m").expect("tims -> m").to_string(), "1.5 meter");
    assert_eq!(convert(&reg, 3.0, "tims", "meter").expect("tims -> meter").to_string(), "4.5 meter");
    assert_close(convert(&reg, 3.0, "m", "tims").expect("m -> tims").magnitude(), 2.0);
}

#[test]
fn compound_units_convert() {
    let reg = registry();
    assert_close(convert(&reg, 36.0, "kph", "m/s").expect("kph -> m/s").magnitude(), 10.0);
    assert_close(convert(&reg, 60.0, "mph", "km/h").expect("mph -> km/h").magnitude(), 96.56064);
    assert_close(convert(&reg, 1.0, "mile", "km").expect("mile -> km").magnitude(), 1.609344);

    let force = convert(&reg, 1.0, "N", "kg*m/s^2").expect("newton -> base");
    assert_eq!(force.to_string(), "1.0 kilogram·meter/second²");

    let hour = convert(&reg, 1.0, "hours", "s").expect("hour -> second");
    assert_eq!(hour.to_string(), "3600.0 second");
}

#[test]
fn temperatures_convert_affinely() {
    let reg = registry();
    assert_close(convert(&reg, 100.0, "degC", "degF").expect("C -> F").magnitude(), 212.0);
    assert_close(convert(&reg, 32.0, "degF", "degC").expect("F -> C").magnitude(), 0.0);
    assert_close(convert(&reg, 0.0, "celsius", "K").expect("C -> K").magnitude(), 273.15);
    assert_close(convert(&reg, 491.67, "degR", "degC").expect("R -> C").magnitude(), 0.0);
}

#[test]
fn offset_units_do_not_combine() {
    let reg = registry();
    let err = convert(&reg, 1.0, "degC/s", "K/s").expect_err("offset in compound");
    assert!(matches!(err, UnitError::OffsetUnit { .. }), "{err:?}");

    let err = convert(&reg, 1.0, "degC**2", "K**2").expect_err("offset squared");
    assert!(matches!(err, UnitError::OffsetUnit { .. }), "{err:?}");
}

#[test]
fn incompatible_dimensions_are_rejected() {
    let reg = registry();
    let err = convert(&reg, 1.0, "m", "s").expect_err("length -> time");
    let UnitError::Dimensionality { from, to, from_dim, to_dim, .. } = &err else {
        panic!("expected a dimensionality error, got {err:?}");
    };
    assert_eq!(from, "meter");
    assert_eq!(to, "second");
    assert_eq!(from_dim.to_string(), "[length]");
    assert_eq!(to_dim.to_string(), "[time]");
    assert_eq!(err.to_string(), "Cannot convert from 'meter' ([length]) to 'second' ([time])");
}

#[test]
fn unknown_and_malformed_expressions() {
    let reg = registry();

    let err = reg.parse_expression("bogus").expect_err("unknown unit");
    assert!(matches!(&err, UnitError::UndefinedUnit { name, .. } if name == "bogus"));
    assert_eq!(err.to_string(), "Undefined unit: 'bogus'");

    assert!(matches!(reg.parse_expression("m/"), Err(UnitError::Syntax { .. })));
    assert!(matches!(reg.parse_expression("(m"), Err(UnitError::Syntax { .. })));
}

#[test]
fn redefinition_is_an_error() {
    let err = UnitRegistry::builder().define("meter = 2 * m").build().expect_err("meter exists");
    assert!(matches!(&err, UnitError::Redefinition { name, .. } if name == "meter"));
    assert!(err.to_string().contains("definition 'meter = 2 * m'"), "{err}");

    let err = UnitRegistry::builder()
        .definitions(["tims = 1.5 * m = tims", "tims = 2 * m"])
        .build()
        .expect_err("tims twice");
    assert!(matches!(err, UnitError::Redefinition { .. }));
}

#[test]
fn custom_definitions_can_build_on_each_other() {
    let reg = UnitRegistry::builder()
        .definitions(["tims = 1.5 * m = tims", "double_tims = 2 * tims = dt"])
        .build()
        .expect("chained definitions");

    assert_eq!(convert(&reg, 1.0, "dt", "m").expect("dt -> m").to_string(), "3.0 meter");
    let unit = reg.get("dt").expect("registered by symbol");
    assert_eq!(unit.name(), "double_tims");
    assert_eq!(unit.dimensionality().to_string(), "[length]");
}

#[test]
fn definitions_must_reference_known_units() {
    let err = UnitRegistry::builder().define("smoot = 1.7018 * bogometer").build().expect_err("unknown base");
    assert!(matches!(err, UnitError::UndefinedUnit { .. }), "{err:?}");
}

#[test]
fn deeply_nested_expressions_are_rejected_on_a_worker_sized_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024)
        .spawn(|| {
            let reg = registry();
            [format!("{}m", "-".repeat(60_000)), format!("{}m{}", "(".repeat(30_000), ")".repeat(30_000))]
                .iter()
                .all(|input| matches!(reg.parse_expression(input), Err(UnitError::Syntax { .. })))
        })
        .expect("spawn worker");
    assert!(handle.join().expect("worker completes"));
}

#[test]
fn exponent_overflow_is_a_syntax_error() {
    let reg = registry();
    for input in ["m**2147483647 * m", "(m**65536)**65536"] {
        assert!(matches!(reg.parse_expression(input), Err(UnitError::Syntax { .. })), "{input}");
    }

    let source = reg.parse_expression("hectare**2000000000").expect("exponent fits");
    let err = reg.convert(&source, &reg.parse_units("m").expect("meter")).expect_err("dimension overflows");
    assert!(matches!(err, UnitError::Syntax { .. }), "{err:?}");
}

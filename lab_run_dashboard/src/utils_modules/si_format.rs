const PREFIXES: [(i32, &str); 17] = [
    (-24, "y"),
    (-21, "z"),
    (-18, "a"),
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
    (21, "Z"),
    (24, "Y"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiUnit {
    Ampere,
    Volt,
    Ohm,
    Farad,
    Henry,
    Watt,
    Joule,
    Second,
    Meter,
    Gram,
    Coulomb,
    Kelvin,
    Decibel,
}

impl SiUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            SiUnit::Ampere => "A",
            SiUnit::Volt => "V",
            SiUnit::Ohm => "Ω",
            SiUnit::Farad => "F",
            SiUnit::Henry => "H",
            SiUnit::Watt => "W",
            SiUnit::Joule => "J",
            SiUnit::Second => "s",
            SiUnit::Meter => "m",
            SiUnit::Gram => "g",
            SiUnit::Coulomb => "C",
            SiUnit::Kelvin => "K",
            SiUnit::Decibel => "dB",
        }
    }

    #[doc = "Unit conventionally recorded under a measured column name, if known"]
    pub fn for_column(column: &str) -> Option<SiUnit> {
        match column.trim().to_ascii_lowercase().as_str() {
            "voltage" | "v" | "bias" => Some(SiUnit::Volt),
            "current" | "i" => Some(SiUnit::Ampere),
            "resistance" | "r" => Some(SiUnit::Ohm),
            "capacitance" => Some(SiUnit::Farad),
            "inductance" => Some(SiUnit::Henry),
            "power" => Some(SiUnit::Watt),
            "energy" => Some(SiUnit::Joule),
            "time" | "t" => Some(SiUnit::Second),
            "length" | "distance" => Some(SiUnit::Meter),
            "mass" => Some(SiUnit::Gram),
            "charge" => Some(SiUnit::Coulomb),
            "temperature" => Some(SiUnit::Kelvin),
            "gain" | "attenuation" => Some(SiUnit::Decibel),
            _ => None,
        }
    }
}

#[doc = r#"
    Formats a quantity with the most compact SI prefix and two decimals,
    e.g. `0.00123 V` becomes `1.23 mV`.

    Decibels are logarithmic and are never prefixed. Zero and non-finite
    values are printed without a prefix.
"#]
pub fn format_si(value: f64, unit: SiUnit) -> String {
    if unit == SiUnit::Decibel || value == 0.0 || !value.is_finite() {
        return format!("{:.2} {}", value, unit.symbol());
    }

    let exponent: i32 = value.abs().log10().floor() as i32;
    let engineering: i32 = (exponent.div_euclid(3) * 3).clamp(-24, 24);

    let mut scaled: f64 = value / 10f64.powi(engineering);
    let mut prefix_exp: i32 = engineering;

    /* 반올림으로 1000.00이 되는 경우 다음 접두어로 이동 */
    if (scaled.abs() * 100.0).round() / 100.0 >= 1000.0 && prefix_exp < 24 {
        prefix_exp += 3;
        scaled = value / 10f64.powi(prefix_exp);
    }

    let prefix: &str = PREFIXES
        .iter()
        .find(|(exp, _)| *exp == prefix_exp)
        .map(|(_, p)| *p)
        .unwrap_or("");

    format!("{:.2} {}{}", scaled, prefix, unit.symbol())
}

#[doc = "Axis tick label: SI formatted when the column has a known unit"]
pub fn format_axis_value(value: f64, unit: Option<SiUnit>) -> String {
    match unit {
        Some(unit) => format_si(value, unit),
        None => format!("{:.2}", value),
    }
}

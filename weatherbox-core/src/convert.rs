/// Kelvin to whole degrees Fahrenheit.
///
/// The scaled Celsius value is floored *before* 32 is added, which is not the
/// exact conversion but is what the weather box has always displayed.
pub fn kelvin_to_fahrenheit(kelvin: f64) -> i64 {
    ((kelvin - 273.15) * 1.8).floor() as i64 + 32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_celsius_is_fifty() {
        assert_eq!(kelvin_to_fahrenheit(283.15), 50);
    }

    #[test]
    fn freezing_point() {
        assert_eq!(kelvin_to_fahrenheit(273.15), 32);
    }

    #[test]
    fn floors_before_adding_offset() {
        // (300 - 273.15) * 1.8 = 48.33 -> 48 + 32
        assert_eq!(kelvin_to_fahrenheit(300.0), 80);
        // (273.0 - 273.15) * 1.8 = -0.27 -> -1 + 32
        assert_eq!(kelvin_to_fahrenheit(273.0), 31);
    }

    #[test]
    fn absolute_zero() {
        assert_eq!(kelvin_to_fahrenheit(0.0), -460);
    }
}

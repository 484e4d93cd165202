// ============================================================================
// Basic Usage Example
// ============================================================================

use ethnum::u256;
use fixed_point_engine::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Fixed-Point Engine Example ===\n");

    let x: Fixed59x18 = "2.5".parse()?;
    let y = Fixed59x18::from_integer(4)?;

    // Rounding and decomposition
    println!("x        = {}", x);
    println!("floor(x) = {}", x.floor()?);
    println!("ceil(x)  = {}", x.ceil()?);
    println!("frac(x)  = {}", x.frac());
    println!("floor(-x) = {}\n", (-x).floor()?);

    // Scaled arithmetic
    println!("x * y    = {}", x.checked_mul(y)?);
    println!("x / y    = {}", x.checked_div(y)?);
    println!("x * y / 3 (full precision) = {}\n", x.checked_mul_div(y, Fixed59x18::from_integer(3)?)?);

    // Logarithms and exponentials
    println!("log2(y)  = {}", y.log2()?);
    println!("ln(e)    = {} (approximate)", Fixed59x18::e().ln()?);
    println!("exp2(x)  = {}", x.exp2()?);
    println!("exp(1)   = {}", Fixed59x18::unit().exp()?);
    println!("sqrt(2)  = {}\n", Fixed59x18::TWICE_UNIT.sqrt()?);

    // Bit primitives
    let n = u256::new(1000);
    println!("msb(1000)              = {}", most_significant_bit(n));
    println!("is_power_of_two(1000)  = {}", is_power_of_two(n)?);
    println!("next_power_of_two(1000) = {}\n", next_power_of_two(n)?);

    // Failures are reported, never wrapped
    match Fixed59x18::ZERO.ln() {
        Ok(value) => println!("ln(0) = {}", value),
        Err(e) => println!("ln(0) failed: {} ({:?})", e, e.kind()),
    }
    match Fixed59x18::MAX.checked_mul(y) {
        Ok(value) => println!("MAX * 4 = {}", value),
        Err(e) => println!("MAX * 4 failed: {} ({:?})", e, e.kind()),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

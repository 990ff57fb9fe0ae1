use heatcalc::input::CalculationInput;
use schemars::schema_for;

fn main() -> Result<(), serde_json::Error> {
    let schema = schema_for!(CalculationInput);
    println!("{}", serde_json::to_string_pretty(&schema)?);

    Ok(())
}

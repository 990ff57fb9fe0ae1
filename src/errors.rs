use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Input failed validation: {0}")]
    InvalidInput(#[from] ValidationError),
    #[error("Energy assumptions could not be used: {0}")]
    InvalidAssumptions(AssumptionsError),
    #[error("Error while writing results: {0}")]
    FailureInOutput(OutputError),
}

/// Reasons a set of calculator inputs is rejected before any arithmetic runs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' must be a finite number but was {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("Floor area must be greater than zero but was {0} m²")]
    FloorAreaNotPositive(f64),
    #[error("Indoor temperature must be between 18 and 25ºC inclusive but was {0}ºC")]
    IndoorTempOutOfRange(f64),
    #[error("Design temperature must be between -30 and 30ºC inclusive but was {0}ºC")]
    DesignTempOutOfRange(f64),
    #[error("Electricity rate must not be negative but was £{0}/kWh")]
    ElectricityRateNegative(f64),
    #[error("Export rate must not be negative but was £{0}/kWh")]
    ExportRateNegative(f64),
    #[error("Installed capacity must be greater than zero but was {0} kW")]
    InstalledCapacityNotPositive(f64),
    #[error("System size must be greater than zero but was {0} kWp")]
    SystemSizeNotPositive(f64),
    #[error("Panel pitch must be between 0 and 90 degrees inclusive but was {0}")]
    PitchOutOfRange(f64),
    #[error("Self-consumption must be a fraction between 0 and 1 inclusive but was {0}")]
    SelfConsumptionOutOfRange(f64),
    #[error("System cost must not be negative but was £{0}")]
    SystemCostNegative(f64),
    #[error("Coefficient table gives a {coefficient} of {value}, which must be finite and greater than zero")]
    CoefficientNotPositive {
        coefficient: &'static str,
        value: f64,
    },
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct AssumptionsError {
    error: anyhow::Error,
}

impl AssumptionsError {
    pub(crate) fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct OutputError {
    error: anyhow::Error,
}

impl OutputError {
    pub(crate) fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}

use std::path::PathBuf;

use autoscan_core::Filter;
use clap::Args;

/// Search criteria. Flags override values loaded from `--filter-file`.
#[derive(Debug, Default, Clone, Args)]
pub struct FilterArgs {
    /// JSON file with search parameters in the API wire format
    #[arg(long, value_name = "FILE")]
    pub filter_file: Option<PathBuf>,

    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub vehicle_type: Option<String>,
    #[arg(long)]
    pub price_from: Option<String>,
    #[arg(long)]
    pub price_to: Option<String>,
    #[arg(long)]
    pub mileage_from: Option<String>,
    #[arg(long)]
    pub mileage_to: Option<String>,
    #[arg(long)]
    pub year_from: Option<String>,
    #[arg(long)]
    pub year_to: Option<String>,
    /// Minimum power in kW
    #[arg(long)]
    pub power_from: Option<String>,
    /// Maximum power in kW
    #[arg(long)]
    pub power_to: Option<String>,
    /// e.g. `Diesel`, `Benzin`, `Elektro`
    #[arg(long)]
    pub fuel: Option<String>,
    /// `Schaltgetriebe` or `Automatik`
    #[arg(long)]
    pub transmission: Option<String>,
    /// `Privat` or `Händler`
    #[arg(long)]
    pub seller: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Search radius in km around `--postal-code`
    #[arg(long)]
    pub radius: Option<String>,
    /// Minimum remaining inspection validity in months
    #[arg(long)]
    pub inspection_months: Option<String>,
    #[arg(long)]
    pub emission_class: Option<String>,
}

impl FilterArgs {
    /// Builds the filter, starting from `--filter-file` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter file cannot be read or parsed.
    pub fn into_filter(self) -> anyhow::Result<Filter> {
        let mut filter = match self.filter_file.as_ref() {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("failed to read filter file {}: {e}", path.display())
                })?;
                serde_json::from_str::<Filter>(&raw).map_err(|e| {
                    anyhow::anyhow!("failed to parse filter file {}: {e}", path.display())
                })?
            }
            None => Filter::default(),
        };

        let overrides = [
            (&mut filter.brand, self.brand),
            (&mut filter.model, self.model),
            (&mut filter.vehicle_type, self.vehicle_type),
            (&mut filter.price_from, self.price_from),
            (&mut filter.price_to, self.price_to),
            (&mut filter.mileage_from, self.mileage_from),
            (&mut filter.mileage_to, self.mileage_to),
            (&mut filter.year_from, self.year_from),
            (&mut filter.year_to, self.year_to),
            (&mut filter.power_from, self.power_from),
            (&mut filter.power_to, self.power_to),
            (&mut filter.fuel, self.fuel),
            (&mut filter.transmission, self.transmission),
            (&mut filter.seller, self.seller),
            (&mut filter.postal_code, self.postal_code),
            (&mut filter.radius, self.radius),
            (&mut filter.inspection_months, self.inspection_months),
            (&mut filter.emission_class, self.emission_class),
        ];
        for (slot, value) in overrides {
            if value.is_some() {
                *slot = value;
            }
        }

        Ok(filter)
    }
}

//! Validation logic for configuration sections.

use anyhow::Result;

use super::defaults::{CompositionConfig, DeadlineConfig, ReferenceConfig, SpcConfig};
use crate::deadline::parse_utc_offset;

impl SpcConfig {
    /// Validate SPC configuration
    pub fn validate(&self) -> Result<()> {
        if self.window < 2 {
            anyhow::bail!("spc.window must be at least 2, got {}", self.window);
        }

        if self.d2 <= 0.0 {
            anyhow::bail!("spc.d2 must be greater than 0, got {}", self.d2);
        }

        if self.sigma_multiplier <= 0.0 {
            anyhow::bail!(
                "spc.sigma_multiplier must be greater than 0, got {}",
                self.sigma_multiplier
            );
        }

        if self.min_history < 2 {
            anyhow::bail!("spc.min_history must be at least 2, got {}", self.min_history);
        }

        if self.min_history > self.window {
            anyhow::bail!(
                "spc.min_history ({}) cannot exceed spc.window ({})",
                self.min_history,
                self.window
            );
        }

        Ok(())
    }
}

impl DeadlineConfig {
    /// Validate deadline configuration
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("collection_to_issue_days", self.collection_to_issue_days),
            ("total_process_days_normal", self.total_process_days_normal),
            (
                "total_process_days_without_validation",
                self.total_process_days_without_validation,
            ),
            ("resampling_business_days", self.resampling_business_days),
        ];
        for (name, value) in limits {
            if value < 0 {
                anyhow::bail!("deadlines.{} must not be negative, got {}", name, value);
            }
        }

        parse_utc_offset(&self.utc_offset)?;

        Ok(())
    }
}

impl ReferenceConfig {
    /// Validate reference conditions
    pub fn validate(&self) -> Result<()> {
        if self.pressure_kpa <= 0.0 {
            anyhow::bail!(
                "reference.pressure_kpa must be greater than 0, got {}",
                self.pressure_kpa
            );
        }

        if self.temperature_k <= 0.0 {
            anyhow::bail!(
                "reference.temperature_k must be greater than 0, got {}",
                self.temperature_k
            );
        }

        Ok(())
    }
}

impl CompositionConfig {
    /// Validate composition checks
    pub fn validate(&self) -> Result<()> {
        if self.balance_tolerance_percent < 0.0 {
            anyhow::bail!(
                "composition.balance_tolerance_percent must not be negative, got {}",
                self.balance_tolerance_percent
            );
        }

        if self.detailed_min_components == 0 {
            anyhow::bail!("composition.detailed_min_components must be at least 1");
        }

        Ok(())
    }
}

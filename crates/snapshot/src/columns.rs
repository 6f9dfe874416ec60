//! Whitespace-separated column text input with per-column unit headers.
//!
//! A snapshot file is UTF-8 text: `#` lines are comments, every other
//! non-blank line is one entity with whitespace-separated numeric fields.
//! Header comments of the form
//!
//! ```text
//! # column 4: gas mass (kg)
//! ```
//!
//! override the default unit for that column; files without unit headers
//! use the defaults of the import configuration (pc, M☉, M☉/pc³, K, m/s, T).

use std::fs;
use std::path::Path;

use units::{Length, Mass, Velocity, VolumeDensity};

use crate::error::{ImportError, ImportResult};

/// The physical quantity stored in one column, deciding which units are
/// accepted and what the SI conversion is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Coordinate or smoothing length; default pc, stored as m
    Length,
    /// Integrated mass; default M☉, stored as kg
    Mass,
    /// Mass volume density; default M☉/pc³, stored as kg/m³
    MassVolumeDensity,
    /// Particle count; dimensionless
    Number,
    /// Particle number density; default 1/m³
    NumberVolumeDensity,
    /// Dimensionless value (metallicity, SED family parameters)
    Dimensionless,
    /// Bolometric luminosity; default W
    Luminosity,
    /// Temperature; default K
    Temperature,
    /// Velocity component; default m/s
    Velocity,
    /// Magnetic field component; default T
    MagneticField,
}

/// One column the import configuration expects, in file order.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Name used in diagnostics
    pub name: String,
    /// Quantity deciding the accepted units
    pub quantity: Quantity,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Convert a raw field value in the given unit to SI.
fn to_si(value: f64, quantity: Quantity, unit: &str) -> Option<f64> {
    match quantity {
        Quantity::Length => match unit {
            "pc" => Some(Length::from_parsec(value).to_m()),
            "au" | "AU" => Some(Length::from_au(value).to_m()),
            "km" => Some(Length::from_km(value).to_m()),
            "m" => Some(value),
            _ => None,
        },
        Quantity::Mass => match unit {
            "Msun" => Some(Mass::from_solar_masses(value).to_kg()),
            "kg" => Some(value),
            "g" => Some(Mass::from_grams(value).to_kg()),
            _ => None,
        },
        Quantity::MassVolumeDensity => match unit {
            "Msun/pc3" => Some(VolumeDensity::from_solar_masses_per_pc3(value).to_kg_per_m3()),
            "kg/m3" => Some(value),
            "g/cm3" => Some(VolumeDensity::from_g_per_cm3(value).to_kg_per_m3()),
            _ => None,
        },
        Quantity::Number | Quantity::Dimensionless => match unit {
            "1" | "" => Some(value),
            _ => None,
        },
        Quantity::NumberVolumeDensity => match unit {
            "1/m3" => Some(value),
            "1/cm3" => Some(value * 1e6),
            _ => None,
        },
        Quantity::Luminosity => match unit {
            "W" => Some(value),
            "Lsun" => Some(units::Luminosity::from_solar_luminosities(value).to_watts()),
            _ => None,
        },
        Quantity::Temperature => match unit {
            "K" => Some(value),
            _ => None,
        },
        Quantity::Velocity => match unit {
            "m/s" => Some(value),
            "km/s" => Some(Velocity::from_km_per_s(value).to_m_per_s()),
            _ => None,
        },
        Quantity::MagneticField => match unit {
            "T" => Some(value),
            "uT" => Some(value * 1e-6),
            _ => None,
        },
    }
}

/// Default unit string per quantity, used when no header overrides it.
fn default_unit(quantity: Quantity) -> &'static str {
    match quantity {
        Quantity::Length => "pc",
        Quantity::Mass => "Msun",
        Quantity::MassVolumeDensity => "Msun/pc3",
        Quantity::Number | Quantity::Dimensionless => "1",
        Quantity::NumberVolumeDensity => "1/m3",
        Quantity::Luminosity => "W",
        Quantity::Temperature => "K",
        Quantity::Velocity => "m/s",
        Quantity::MagneticField => "T",
    }
}

/// An opened column text file: raw lines plus the units declared in its
/// header comments. Rows are parsed and converted on `read`.
#[derive(Debug, Clone)]
pub struct TextColumnFile {
    name: String,
    lines: Vec<(usize, String)>,       // (1-based line number, data line)
    header_units: Vec<Option<String>>, // per column index, from header comments
}

impl TextColumnFile {
    /// Open a file from disk.
    pub fn open(path: &Path) -> ImportResult<Self> {
        let name = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ImportError::Io {
            file: name.clone(),
            source,
        })?;
        Ok(Self::from_string(name, &contents))
    }

    /// Open from in-memory text, keeping the same parsing path as `open`.
    pub fn from_string(name: impl Into<String>, contents: &str) -> Self {
        let name = name.into();
        let mut lines = Vec::new();
        let mut header_units: Vec<Option<String>> = Vec::new();

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if let Some((column, unit)) = parse_unit_header(comment) {
                    if header_units.len() < column {
                        header_units.resize(column, None);
                    }
                    header_units[column - 1] = Some(unit);
                }
                continue;
            }
            lines.push((index + 1, line.to_string()));
        }

        Self {
            name,
            lines,
            header_units,
        }
    }

    /// File name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of data rows.
    pub fn num_rows(&self) -> usize {
        self.lines.len()
    }

    /// Parse all rows against the column specification, converting every
    /// field to SI. Rows may carry extra trailing columns; those are
    /// ignored. A row with fewer fields than specified is an error.
    pub fn read(&self, specs: &[ColumnSpec]) -> ImportResult<Vec<Vec<f64>>> {
        if self.lines.is_empty() {
            return Err(ImportError::NoEntities {
                file: self.name.clone(),
            });
        }

        // Resolve the unit for each column once
        let mut units = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let unit = self
                .header_units
                .get(index)
                .and_then(|u| u.clone())
                .unwrap_or_else(|| default_unit(spec.quantity).to_string());
            // Validate against the quantity using a probe value
            if to_si(1.0, spec.quantity, &unit).is_none() {
                return Err(ImportError::UnknownUnit {
                    file: self.name.clone(),
                    column: spec.name.clone(),
                    unit,
                });
            }
            units.push(unit);
        }

        let mut rows = Vec::with_capacity(self.lines.len());
        for (line, text) in &self.lines {
            let fields: Vec<&str> = text.split_whitespace().collect();
            if fields.len() < specs.len() {
                return Err(ImportError::MissingColumns {
                    file: self.name.clone(),
                    line: *line,
                    expected: specs.len(),
                    got: fields.len(),
                });
            }

            let mut row = Vec::with_capacity(specs.len());
            for (index, spec) in specs.iter().enumerate() {
                let token = fields[index];
                let value: f64 = token.parse().map_err(|_| ImportError::ParseNumber {
                    file: self.name.clone(),
                    line: *line,
                    column: index + 1,
                    token: token.to_string(),
                })?;
                // Unit already validated above
                row.push(to_si(value, spec.quantity, &units[index]).unwrap());
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Parse a header comment of the form `column <i>: <description> (<unit>)`.
fn parse_unit_header(comment: &str) -> Option<(usize, String)> {
    let rest = comment.trim().strip_prefix("column")?.trim_start();
    let colon = rest.find(':')?;
    let column: usize = rest[..colon].trim().parse().ok()?;
    if column == 0 {
        return None;
    }
    let description = rest[colon + 1..].trim();
    let open = description.rfind('(')?;
    let close = description.rfind(')')?;
    if close <= open {
        return None;
    }
    Some((column, description[open + 1..close].trim().to_string()))
}

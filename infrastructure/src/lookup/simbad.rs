//! SIMBAD object lookup over the TAP interface

use lab_application::ports::reference_lookup::LookupError;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// TAP JSON result: column metadata plus rows of values
#[derive(Debug, Deserialize)]
struct TapResult {
    metadata: Vec<TapColumn>,
    data: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct TapColumn {
    name: String,
}

impl TapResult {
    /// Value of `column` in the first row, if present and not null
    fn cell(&self, column: &str) -> Option<&Value> {
        let index = self
            .metadata
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(column))?;
        self.data.first()?.get(index).filter(|v| !v.is_null())
    }
}

fn adql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn object_query(name: &str) -> String {
    format!(
        "SELECT TOP 1 b.main_id, b.ra, b.dec, b.otype, b.sp_type, b.rvz_radvel, b.plx_value, \
         v.flux AS flux_v, bf.flux AS flux_b, r.flux AS flux_r, \
         d.dist AS dist_value, d.unit AS dist_unit \
         FROM basic AS b \
         JOIN ident AS i ON i.oidref = b.oid \
         LEFT JOIN mesDistance AS d ON d.oidref = b.oid \
         LEFT JOIN flux AS v ON v.oidref = b.oid AND v.filter = 'V' \
         LEFT JOIN flux AS bf ON bf.oidref = b.oid AND bf.filter = 'B' \
         LEFT JOIN flux AS r ON r.oidref = b.oid AND r.filter = 'R' \
         WHERE i.id = {}",
        adql_literal(name)
    )
}

/// Render an angle as `DD:MM:SS.ss`, with a sign when `signed`
fn sexagesimal(value: f64, signed: bool) -> String {
    let sign = if value < 0.0 { "-" } else { "+" };
    let hundredths = (value.abs() * 360_000.0).round() as u64;
    let units = hundredths / 360_000;
    let minutes = (hundredths / 6_000) % 60;
    let seconds = (hundredths / 100) % 60;
    let fraction = hundredths % 100;
    format!(
        "{}{:02}:{:02}:{:02}.{:02}",
        if signed { sign } else { "" },
        units,
        minutes,
        seconds,
        fraction
    )
}

/// Convert a `mesDistance` measurement to parsecs
fn distance_pc(value: f64, unit: &str) -> Option<f64> {
    let scale = match unit.trim() {
        "pc" => 1.0,
        "kpc" => 1e3,
        "Mpc" => 1e6,
        _ => return None,
    };
    Some(value * scale)
}

fn describe(name: &str, result: &TapResult) -> Value {
    if result.data.is_empty() {
        return json!({ "error": format!("Object '{}' not found in SIMBAD.", name) });
    }

    let text = |column: &str| {
        result
            .cell(column)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
    };
    let number = |column: &str| result.cell(column).and_then(Value::as_f64);

    let coordinates = match (number("ra"), number("dec")) {
        (Some(ra), Some(dec)) => json!({
            "ra_deg": ra,
            "dec_deg": dec,
            "ra_hms": sexagesimal(ra / 15.0, false),
            "dec_dms": sexagesimal(dec, true),
        }),
        _ => Value::Null,
    };

    json!({
        "name": text("main_id").unwrap_or_else(|| name.to_string()),
        "coordinates": coordinates,
        "object_type": text("otype"),
        "spectral_type": text("sp_type"),
        "magnitudes": {
            "V": number("flux_v"),
            "B": number("flux_b"),
            "R": number("flux_r"),
        },
        "distance_pc": number("dist_value")
            .zip(text("dist_unit"))
            .and_then(|(value, unit)| distance_pc(value, &unit)),
        "radial_velocity_km_s": number("rvz_radvel"),
        "parallax_mas": number("plx_value"),
    })
}

/// Client for the SIMBAD TAP service
pub struct SimbadLookup {
    client: reqwest::Client,
    tap_url: String,
}

impl SimbadLookup {
    pub fn new(client: reqwest::Client, tap_url: impl Into<String>) -> Self {
        Self {
            client,
            tap_url: tap_url.into(),
        }
    }

    /// Look up an object by name, returning a JSON document.
    ///
    /// An unknown object is not an error: the document carries an `error`
    /// field the model can read.
    pub async fn lookup(&self, name: &str) -> Result<String, LookupError> {
        debug!(object = name, "Querying SIMBAD");

        let query = object_query(name);
        let response = self
            .client
            .post(&self.tap_url)
            .form(&[
                ("REQUEST", "doQuery"),
                ("LANG", "ADQL"),
                ("FORMAT", "json"),
                ("QUERY", query.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::ServiceFailed(format!("SIMBAD request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ServiceFailed(format!(
                "SIMBAD returned HTTP {}",
                status.as_u16()
            )));
        }

        let result: TapResult = response
            .json()
            .await
            .map_err(|e| LookupError::ServiceFailed(format!("Invalid SIMBAD response: {}", e)))?;

        serde_json::to_string_pretty(&describe(name, &result))
            .map_err(|e| LookupError::ServiceFailed(e.to_string()))
    }
}

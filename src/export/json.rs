use super::ExportError;
use std::io::Write;
use std::path::Path;

/// Render any serializable value as pretty JSON
pub fn to_json<T: serde::Serialize>(data: &T) -> Result<String, ExportError> {
    serde_json::to_string_pretty(data).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Export any serializable data structure to a JSON file
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<(), ExportError>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let json_data = to_json(data)?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;

    Ok(())
}

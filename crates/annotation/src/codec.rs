use crate::types::{Annotation, BoundingBox, RecordKind};
use std::fmt::Write;

/// Parse one non-blank annotation line.
///
/// Returns the reason as a plain string; the reader attaches file and line.
pub fn parse_line(line: &str, kind: RecordKind) -> Result<Annotation, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != kind.field_count() {
        return Err(format!(
            "expected {} fields, found {}",
            kind.field_count(),
            fields.len()
        ));
    }

    let class_id: u32 = fields[0]
        .parse()
        .map_err(|_| format!("class id `{}` is not a non-negative integer", fields[0]))?;

    let center_x = parse_unit(fields[1], "center_x")?;
    let center_y = parse_unit(fields[2], "center_y")?;
    let width = parse_unit(fields[3], "width")?;
    let height = parse_unit(fields[4], "height")?;
    let bbox = BoundingBox::new(center_x, center_y, width, height);

    Ok(match kind {
        RecordKind::GroundTruth => Annotation::ground_truth(class_id, bbox),
        RecordKind::Inference => {
            Annotation::inference(class_id, bbox, parse_unit(fields[5], "confidence")?)
        }
    })
}

/// Coordinates and confidences are normalized; anything outside `[0, 1]`
/// is a malformed record.
fn parse_unit(field: &str, name: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err(format!("{name} `{field}` is not a finite number")),
        Ok(value) if !(0.0..=1.0).contains(&value) => {
            Err(format!("{name} `{field}` is outside [0, 1]"))
        }
        Ok(value) => Ok(value),
        Err(_) => Err(format!("{name} `{field}` is not a finite number")),
    }
}

/// Format a record as a single line without the trailing newline.
pub fn format_line(annotation: &Annotation) -> String {
    let b = &annotation.bbox;
    let mut line = format!(
        "{} {} {} {} {}",
        annotation.class_id, b.center_x, b.center_y, b.width, b.height
    );
    if let Some(confidence) = annotation.confidence {
        let _ = write!(line, " {confidence}");
    }
    line
}

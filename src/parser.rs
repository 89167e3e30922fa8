use crate::ir::{AxisFrame, BracketSpec, EndpointRef, Observation};
use crate::layout::error::{LayoutError, Result as LayoutResult};
use crate::layout::validate::spec_from_value;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

static BRACKET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[\s*(?P<c1>[^:\[\]]+?)\s*:\s*(?P<s1>[^:\[\]]*?)\s*\]\s*\[\s*(?P<c2>[^:\[\]]+?)\s*:\s*(?P<s2>[^:\[\]]*?)\s*\](?P<mark>[^\[]*)",
    )
    .unwrap()
});

/// Everything needed to lay out one annotated axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Instructions {
    pub categories: Vec<String>,
    pub subgroups: Option<Vec<String>>,
    pub box_width: Option<f32>,
    pub frame: AxisFrame,
    pub bracket_base_y: Option<f32>,
    pub brackets: Vec<BracketSpec>,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstructionsFile {
    categories: Vec<Value>,
    subgroups: Option<Vec<Value>>,
    box_width: Option<f32>,
    y_limits: [f32; 2],
    bracket_base_y: Option<f32>,
    #[serde(default)]
    brackets: Option<Value>,
    #[serde(default)]
    observations: Vec<ObservationFile>,
}

#[derive(Debug, Deserialize)]
struct ObservationFile {
    category: Value,
    #[serde(default)]
    subgroup: Option<Value>,
    value: f32,
}

/// Parses an instruction document. JSON5 is accepted so hand-written files
/// may carry comments and trailing commas.
pub fn parse_instructions(input: &str) -> Result<Instructions> {
    let value: Value = json5::from_str(input).context("instructions are not valid JSON5")?;
    let file: InstructionsFile =
        serde_json::from_value(value).context("instructions have the wrong shape")?;

    let categories = file
        .categories
        .iter()
        .map(label_from_value)
        .collect::<Result<Vec<_>>>()
        .context("invalid category label")?;
    let subgroups = match file.subgroups {
        Some(list) => Some(
            list.iter()
                .map(label_from_value)
                .collect::<Result<Vec<_>>>()
                .context("invalid subgroup label")?,
        ),
        None => None,
    };

    let brackets = match file.brackets {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(compact)) => parse_bracket_list(&compact)?,
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| spec_from_value(item).map_err(|err| err.at_index(idx)))
            .collect::<LayoutResult<Vec<_>>>()?,
        Some(other) => {
            anyhow::bail!("brackets must be an array or a bracket string, got {other}")
        }
    };

    let observations = file
        .observations
        .into_iter()
        .map(|obs| -> Result<Observation> {
            Ok(Observation {
                category: label_from_value(&obs.category)?,
                subgroup: obs.subgroup.as_ref().map(label_from_value).transpose()?,
                value: obs.value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Instructions {
        categories,
        subgroups,
        box_width: file.box_width,
        frame: AxisFrame::new(file.y_limits[0], file.y_limits[1]),
        bracket_base_y: file.bracket_base_y,
        brackets,
        observations,
    })
}

/// Category columns are often numeric; they are addressed by their text.
fn label_from_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        // Whole floats print without a fraction so `10.0` addresses "10".
        Value::Number(n) => Ok(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        Value::Bool(b) => Ok(b.to_string()),
        other => anyhow::bail!("labels must be strings or numbers, got {other}"),
    }
}

/// Parses the compact bracket list `[c:s][c:s]mark`, brackets separated by
/// `.` or `;`, e.g. `[1:1][1:2]*.[1:3][2:3]**`. Every mark but the last must
/// end in a separator; marks may contain dots themselves (`n.s..`).
///
/// A reference whose two tokens are both unsigned integers addresses boxes by
/// 1-based index; anything else is a label pair.
pub fn parse_bracket_list(input: &str) -> LayoutResult<Vec<BracketSpec>> {
    let matches: Vec<regex::Captures> = BRACKET_RE.captures_iter(input).collect();
    let mut brackets = Vec::with_capacity(matches.len());
    let mut last_end = 0;

    for (idx, caps) in matches.iter().enumerate() {
        let whole = caps
            .get(0)
            .map(|m| (m.start(), m.end()))
            .unwrap_or((last_end, last_end));
        if !input[last_end..whole.0].trim().is_empty() {
            return Err(LayoutError::malformed(
                idx,
                format!("unexpected text `{}`", input[last_end..whole.0].trim()),
            ));
        }
        last_end = whole.1;

        let first = endpoint_from_tokens(&caps["c1"], &caps["s1"]);
        let second = endpoint_from_tokens(&caps["c2"], &caps["s2"]);
        let mut mark = caps["mark"].trim();
        if idx + 1 < matches.len() {
            mark = mark
                .strip_suffix(|c: char| c == '.' || c == ';')
                .map(str::trim_end)
                .ok_or_else(|| {
                    LayoutError::malformed(
                        idx,
                        format!("expected `.` or `;` after mark `{mark}`"),
                    )
                })?;
        }
        brackets.push(BracketSpec::new(first, second, mark));
    }

    if !input[last_end..].trim().is_empty() {
        return Err(LayoutError::malformed(
            brackets.len(),
            format!("unexpected text `{}`", input[last_end..].trim()),
        ));
    }

    Ok(brackets)
}

fn endpoint_from_tokens(category: &str, subgroup: &str) -> EndpointRef {
    match (category.parse::<usize>(), subgroup.parse::<usize>()) {
        (Ok(category), Ok(subgroup)) => EndpointRef::index(category, subgroup),
        _ => EndpointRef::label(category, subgroup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_brackets() {
        let brackets = parse_bracket_list("[1:1][1:2]*.[1:3][2:3]**").unwrap();
        assert_eq!(brackets.len(), 2);
        assert_eq!(
            brackets[0],
            BracketSpec::new(EndpointRef::index(1, 1), EndpointRef::index(1, 2), "*")
        );
        assert_eq!(
            brackets[1],
            BracketSpec::new(EndpointRef::index(1, 3), EndpointRef::index(2, 3), "**")
        );
    }

    #[test]
    fn parses_label_brackets_and_dotted_marks() {
        let brackets = parse_bracket_list("[ctrl:A][drug:A]n.s..[ctrl:B] [drug:B] p<0.01").unwrap();
        assert_eq!(brackets[0].first, EndpointRef::label("ctrl", "A"));
        assert_eq!(brackets[0].mark, "n.s.");
        assert_eq!(brackets[1].second, EndpointRef::label("drug", "B"));
        assert_eq!(brackets[1].mark, "p<0.01");
    }

    #[test]
    fn mixed_tokens_fall_back_to_labels() {
        let brackets = parse_bracket_list("[1:A][2:B]*").unwrap();
        assert_eq!(brackets[0].first, EndpointRef::label("1", "A"));
    }

    #[test]
    fn empty_list_is_empty() {
        assert!(parse_bracket_list("").unwrap().is_empty());
        assert!(parse_bracket_list("   ").unwrap().is_empty());
    }

    #[test]
    fn single_endpoint_is_malformed() {
        let err = parse_bracket_list("[1:1][1:2]*.[1:3]**").unwrap_err();
        assert!(matches!(err, LayoutError::MalformedBracket { .. }));
    }

    #[test]
    fn text_after_separator_is_malformed() {
        let err = parse_bracket_list("[1:1][1:2]*.junk[1:3][2:3]**").unwrap_err();
        assert!(matches!(err, LayoutError::MalformedBracket { index: 0, .. }));
    }

    #[test]
    fn unknown_separator_is_malformed() {
        let err = parse_bracket_list("[1:1][1:2]*,[1:3][2:3]**").unwrap_err();
        assert!(matches!(err, LayoutError::MalformedBracket { index: 0, .. }));
    }

    #[test]
    fn separator_may_be_padded() {
        let brackets = parse_bracket_list("[1:1][1:2] * ; [1:3][2:3]**").unwrap();
        assert_eq!(brackets[0].mark, "*");
        assert_eq!(brackets[1].mark, "**");
    }

    #[test]
    fn three_token_endpoint_is_malformed() {
        let err = parse_bracket_list("[1:1:1][1:2]*").unwrap_err();
        assert!(matches!(err, LayoutError::MalformedBracket { .. }));
    }

    #[test]
    fn parses_instruction_document() {
        let input = r#"{
            // two conditions, two hues
            categories: ["ctrl", 2],
            subgroups: ["A", "B"],
            yLimits: [0, 20],
            brackets: [[[1, 1], [1, 2], "*"], [["ctrl", "A"], ["2", "B"], "**"]],
            observations: [{category: "ctrl", subgroup: "A", value: 3.5}],
        }"#;
        let inst = parse_instructions(input).unwrap();
        assert_eq!(inst.categories, vec!["ctrl".to_string(), "2".to_string()]);
        assert_eq!(inst.frame, AxisFrame::new(0.0, 20.0));
        assert_eq!(inst.brackets.len(), 2);
        assert_eq!(inst.brackets[1].second, EndpointRef::label("2", "B"));
        assert_eq!(inst.observations[0].subgroup.as_deref(), Some("A"));
        assert_eq!(inst.bracket_base_y, None);
    }

    #[test]
    fn instruction_brackets_may_be_compact() {
        let input = r#"{"categories": ["a", "b"], "yLimits": [0, 1], "brackets": "[1:1][2:1]*"}"#;
        let inst = parse_instructions(input).unwrap();
        assert_eq!(inst.subgroups, None);
        assert_eq!(inst.brackets[0].mark, "*");
    }

    #[test]
    fn malformed_instruction_bracket_reports_index() {
        let input = r#"{"categories": ["a"], "yLimits": [0, 1], "brackets": [[[1, 1], [1, 1], "*"], [[1, 1], "*"]]}"#;
        let err = parse_instructions(input).unwrap_err();
        let layout_err = err.downcast_ref::<LayoutError>().expect("layout error");
        assert!(matches!(layout_err, LayoutError::MalformedBracket { index: 1, .. }));
    }
}

use crate::layout::{BracketLayout, MeanMarker};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub box_width: f32,
    pub bracket_height: f32,
    pub bracket_spacing: f32,
    pub mark_font_size: f32,
    pub y_limit: f32,
    pub brackets: Vec<BracketDump>,
    pub markers: Vec<MeanMarker>,
}

#[derive(Debug, Serialize)]
pub struct BracketDump {
    pub source_index: usize,
    pub mark: String,
    pub x1: f32,
    pub x2: f32,
    pub y_bottom: f32,
    pub y_bar: f32,
    pub label: [f32; 2],
    pub outline: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &BracketLayout, markers: &[MeanMarker]) -> Self {
        let brackets = layout
            .brackets
            .iter()
            .map(|bracket| {
                let (label_x, label_y) = bracket.label_anchor(layout.bracket_height);
                BracketDump {
                    source_index: bracket.source_index,
                    mark: bracket.mark.clone(),
                    x1: bracket.x1,
                    x2: bracket.x2,
                    y_bottom: bracket.y_bottom,
                    y_bar: bracket.y_bar,
                    label: [label_x, label_y],
                    outline: bracket.outline().iter().map(|(x, y)| [*x, *y]).collect(),
                }
            })
            .collect();

        LayoutDump {
            box_width: layout.box_width,
            bracket_height: layout.bracket_height,
            bracket_spacing: layout.bracket_spacing,
            mark_font_size: layout.mark_font_size,
            y_limit: layout.y_limit,
            brackets,
            markers: markers.to_vec(),
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &BracketLayout,
    markers: &[MeanMarker],
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, markers);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

pub fn print_layout_dump(layout: &BracketLayout, markers: &[MeanMarker]) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, markers);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &dump)?;
    writeln!(out)?;
    Ok(())
}

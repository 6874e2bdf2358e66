//! Draw commands and render targets

use crate::sim::{Color, Point};

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear,
    /// Stroke a straight line; an empty `dash` means solid
    Line {
        from: Point,
        to: Point,
        color: Color,
        dash: Vec<f64>,
    },
}

/// Anything that can draw lines
pub trait RenderTarget {
    fn clear(&mut self);

    fn stroke(&mut self, from: Point, to: Point, color: &Color, dash: Option<&[f64]>);

    /// Replay a recorded command
    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear => self.clear(),
            DrawCommand::Line {
                from,
                to,
                color,
                dash,
            } => {
                let dash = (!dash.is_empty()).then_some(dash.as_slice());
                self.stroke(*from, *to, color, dash);
            }
        }
    }
}

/// Records commands instead of drawing them (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Line strokes only, in draw order
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Replay everything onto another target
    #[cfg(test)]
    pub fn replay(&self, target: &mut impl RenderTarget) {
        for command in &self.commands {
            target.execute(command);
        }
    }
}

impl RenderTarget for CommandList {
    fn clear(&mut self) {
        // Anything before a clear is invisible
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke(&mut self, from: Point, to: Point, color: &Color, dash: Option<&[f64]>) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: color.clone(),
            dash: dash.map(<[f64]>::to_vec).unwrap_or_default(),
        });
    }
}

//! Integrity checks for render specs, applied both when a spec is built and when a
//! client ingests one.

use std::fmt;

use crate::{
    color::mapper::DeterminantRange,
    foundation::error::{DetwallError, DetwallResult},
    generate::pass::{Block, GenerationPass},
    layout::planner::plan_grid,
    linalg::matrix::{MAX_MATRIX_DIM, MIN_MATRIX_DIM, Matrix},
    spec::model::{RenderSpec, SpecBlock},
    spec::version::RENDER_SPEC_VERSION,
};

/// Relative tolerance when re-checking a stored determinant.
const DETERMINANT_REL_TOL: f64 = 1e-9;
/// Issues listed in one error message before the rest are summarized.
const MAX_REPORTED_ISSUES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SpecPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SpecIssue {
    pub(crate) path: Vec<SpecPathElem>,
    pub(crate) message: String,
}

impl SpecIssue {
    fn at(path: &[SpecPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SpecPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SpecPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SpecPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

fn into_error(issues: Vec<SpecIssue>) -> DetwallError {
    let mut msg = String::new();
    for (i, issue) in issues.iter().take(MAX_REPORTED_ISSUES).enumerate() {
        if i > 0 {
            msg.push('\n');
        }
        msg.push_str(&issue.to_string());
    }
    if issues.len() > MAX_REPORTED_ISSUES {
        msg.push_str(&format!(
            "\n... and {} more",
            issues.len() - MAX_REPORTED_ISSUES
        ));
    }
    DetwallError::spec_integrity(msg)
}

impl RenderSpec {
    /// Check every integrity rule and rebuild the pass the spec describes.
    ///
    /// Rules: supported version; valid canvas and visual parameters; blocks inside the
    /// canvas and laid out exactly on the planned grid; square, finite matrices whose
    /// determinant matches the stored one; a determinant range equal to the true
    /// extrema over the blocks.
    pub fn validate(&self) -> DetwallResult<GenerationPass> {
        use SpecPathElem::{Field, Index};

        let mut issues = Vec::new();

        if self.version != RENDER_SPEC_VERSION {
            issues.push(SpecIssue::at(
                &[Field("version")],
                format!(
                    "unsupported version {} (expected {RENDER_SPEC_VERSION})",
                    self.version
                ),
            ));
            return Err(into_error(issues));
        }

        if let Err(e) = self.canvas.validate() {
            issues.push(SpecIssue::at(&[Field("canvas")], e.to_string()));
            return Err(into_error(issues));
        }
        if let Err(e) = self.visual.validate() {
            issues.push(SpecIssue::at(&[Field("visual")], e.to_string()));
        }

        // Count check first so a huge canvas with few blocks never reaches the planner.
        let (cols, rows) = self.canvas.grid_dims();
        let expected = u64::from(cols) * u64::from(rows);
        if expected != self.blocks.len() as u64 {
            issues.push(SpecIssue::at(
                &[Field("blocks")],
                format!(
                    "expected {expected} blocks for this canvas, found {}",
                    self.blocks.len()
                ),
            ));
            return Err(into_error(issues));
        }

        let planned = plan_grid(&self.canvas)?;

        let mut blocks = Vec::with_capacity(self.blocks.len());
        for (i, sb) in self.blocks.iter().enumerate() {
            let path = [Field("blocks"), Index(i)];
            let before = issues.len();

            check_bounds(sb, self, &path, &mut issues);
            if let Some(cell) = planned.get(i)
                && issues.len() == before
                && (sb.x, sb.y, sb.width, sb.height)
                    != (cell.rect.x, cell.rect.y, cell.rect.width, cell.rect.height)
            {
                issues.push(SpecIssue::at(
                    &path,
                    format!(
                        "rectangle {}x{}@({},{}) does not match planned cell {}x{}@({},{})",
                        sb.width,
                        sb.height,
                        sb.x,
                        sb.y,
                        cell.rect.width,
                        cell.rect.height,
                        cell.rect.x,
                        cell.rect.y
                    ),
                ));
            }

            if let Some(matrix) = check_matrix(sb, &path, &mut issues) {
                blocks.push(Block {
                    x: sb.x,
                    y: sb.y,
                    width: sb.width,
                    height: sb.height,
                    matrix,
                    determinant: sb.determinant,
                    size: sb.size,
                });
            }
        }

        check_range(&self.determinant_range, &self.blocks, &mut issues);

        if !issues.is_empty() {
            return Err(into_error(issues));
        }

        Ok(GenerationPass {
            canvas: self.canvas,
            visual: self.visual.clone(),
            range: self.determinant_range,
            blocks,
        })
    }
}

fn check_bounds(
    sb: &SpecBlock,
    spec: &RenderSpec,
    path: &[SpecPathElem],
    issues: &mut Vec<SpecIssue>,
) {
    if sb.width == 0 || sb.height == 0 {
        issues.push(SpecIssue::at(path, "block must have a non-empty rectangle"));
        return;
    }
    let right = u64::from(sb.x) + u64::from(sb.width);
    let bottom = u64::from(sb.y) + u64::from(sb.height);
    if right > u64::from(spec.canvas.width) || bottom > u64::from(spec.canvas.height) {
        issues.push(SpecIssue::at(
            path,
            format!(
                "rectangle {}x{}@({},{}) leaves the {}x{} canvas",
                sb.width, sb.height, sb.x, sb.y, spec.canvas.width, spec.canvas.height
            ),
        ));
    }
}

fn check_matrix(
    sb: &SpecBlock,
    path: &[SpecPathElem],
    issues: &mut Vec<SpecIssue>,
) -> Option<Matrix> {
    let field = |name: &'static str| {
        let mut p = path.to_vec();
        p.push(SpecPathElem::Field(name));
        p
    };

    if !(MIN_MATRIX_DIM..=MAX_MATRIX_DIM).contains(&sb.size) {
        issues.push(SpecIssue::at(
            &field("size"),
            format!(
                "size must be in {MIN_MATRIX_DIM}..={MAX_MATRIX_DIM}, got {}",
                sb.size
            ),
        ));
        return None;
    }
    if sb.matrix.len() != sb.size || sb.matrix.iter().any(|row| row.len() != sb.size) {
        issues.push(SpecIssue::at(
            &field("matrix"),
            format!("matrix must be {0}x{0}", sb.size),
        ));
        return None;
    }
    let matrix = match Matrix::from_rows(&sb.matrix) {
        Ok(m) => m,
        Err(e) => {
            issues.push(SpecIssue::at(&field("matrix"), e.to_string()));
            return None;
        }
    };
    if !matrix.is_finite() {
        issues.push(SpecIssue::at(&field("matrix"), "entries must be finite"));
        return None;
    }
    if !sb.determinant.is_finite() {
        issues.push(SpecIssue::at(&field("determinant"), "must be finite"));
        return None;
    }
    let recomputed = matrix.determinant();
    let scale = 1.0f64.max(recomputed.abs()).max(sb.determinant.abs());
    if (recomputed - sb.determinant).abs() > DETERMINANT_REL_TOL * scale {
        issues.push(SpecIssue::at(
            &field("determinant"),
            format!(
                "stored {} does not match matrix determinant {recomputed}",
                sb.determinant
            ),
        ));
        return None;
    }
    Some(matrix)
}

fn check_range(range: &DeterminantRange, blocks: &[SpecBlock], issues: &mut Vec<SpecIssue>) {
    use SpecPathElem::Field;

    if !range.min.is_finite() || !range.max.is_finite() {
        issues.push(SpecIssue::at(
            &[Field("determinant_range")],
            "min/max must be finite",
        ));
        return;
    }
    let Some(actual) = DeterminantRange::from_determinants(blocks.iter().map(|b| b.determinant))
    else {
        return;
    };
    if actual != *range {
        issues.push(SpecIssue::at(
            &[Field("determinant_range")],
            format!(
                "declared [{}, {}] but blocks span [{}, {}]",
                range.min, range.max, actual.min, actual.max
            ),
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/validate.rs"]
mod tests;

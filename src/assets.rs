//! Player mesh loading
//!
//! Reads the small subset of Wavefront OBJ the avatar needs: vertex positions
//! and polygon faces, flattened into a triangle list. Records that do not
//! parse are skipped. When no usable mesh is available the host draws its
//! built-in figure instead.

use std::path::{Path, PathBuf};

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} contains no usable triangles")]
    Empty { path: PathBuf },
}

/// Triangle soup: every three vertices form one triangle
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Vec3>,
}

/// Parse outcome with a count of ignored records
#[derive(Debug, Clone, Default)]
pub struct ParsedMesh {
    pub mesh: Mesh,
    pub skipped: usize,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Parse OBJ text. Never fails; malformed lines are counted and skipped.
    pub fn parse(source: &str) -> ParsedMesh {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut parsed = ParsedMesh::default();

        for (line_no, line) in source.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let ok = match tokens.next() {
                Some("v") => match parse_vertex(tokens) {
                    Some(v) => {
                        positions.push(v);
                        true
                    }
                    None => false,
                },
                Some("f") => match parse_face(tokens, positions.len()) {
                    Some(face) => {
                        // Fan triangulation around the first corner
                        for i in 1..face.len() - 1 {
                            parsed.mesh.triangles.push(positions[face[0]]);
                            parsed.mesh.triangles.push(positions[face[i]]);
                            parsed.mesh.triangles.push(positions[face[i + 1]]);
                        }
                        true
                    }
                    None => false,
                },
                // Normals, texcoords, groups, materials, comments: not needed
                _ => true,
            };

            if !ok {
                log::debug!("Skipping malformed OBJ line {}: {:?}", line_no + 1, line);
                parsed.skipped += 1;
            }
        }

        parsed
    }
}

fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

/// Resolve face corners to 0-based position indices.
///
/// Accepts `v`, `v/t`, `v/t/n` and `v//n`; negative indices count back from
/// the most recent vertex.
fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>, vertex_count: usize) -> Option<Vec<usize>> {
    let face = tokens
        .map(|t| {
            let raw: i64 = t.split('/').next()?.parse().ok()?;
            let index = match raw {
                0 => return None,
                i if i > 0 => i - 1,
                i => vertex_count as i64 + i,
            };
            (0..vertex_count as i64)
                .contains(&index)
                .then_some(index as usize)
        })
        .collect::<Option<Vec<_>>>()?;

    (face.len() >= 3).then_some(face)
}

/// Load and parse an OBJ file
pub fn load_mesh(path: &Path) -> Result<Mesh, AssetError> {
    let source = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = Mesh::parse(&source);
    if parsed.skipped > 0 {
        log::warn!("{:?}: skipped {} malformed record(s)", path, parsed.skipped);
    }
    if parsed.mesh.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(parsed.mesh)
}

/// How the host should draw the player
#[derive(Debug, Clone)]
pub enum PlayerModel {
    Mesh(Mesh),
    /// Built-in primitive figure
    Fallback,
}

/// Load the player mesh, falling back to the built-in figure on any error
pub fn load_player_model(path: &Path) -> PlayerModel {
    match load_mesh(path) {
        Ok(mesh) => {
            log::info!("Loaded {:?} ({} triangles)", path, mesh.triangle_count());
            PlayerModel::Mesh(mesh)
        }
        Err(e) => {
            log::warn!("{}; using fallback player model", e);
            PlayerModel::Fallback
        }
    }
}

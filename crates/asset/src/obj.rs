//! Minimal OBJ parser supporting positions, normals and texture coordinates.
//!
//! Output is a flat triangle soup (no vertex sharing). Polygons are fan
//! triangulated from their first corner, and corners without an explicit normal
//! get the normal of the triangle they belong to.

use std::{
    fs,
    io::Read,
    path::Path,
};

use corelib::{SourceError, TextSource, Vec2, Vec3, Vec4, vec2, vec3, vec4};

use crate::{
    error::{MeshError, MeshResult, Pool},
    mesh::MeshData,
};

/// Load a named OBJ resource through a text source.
pub fn load_obj(source: &impl TextSource, name: &str) -> MeshResult<MeshData> {
    let text = source.load_text(name)?;
    let mesh = parse_obj(&text)?;
    log::info!(
        "Loaded mesh '{}': {} triangles ({} vertices)",
        name,
        mesh.triangle_count(),
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> MeshResult<MeshData> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| SourceError::from_io(path.display().to_string(), e))?;
    parse_obj(&text)
}

/// Load an OBJ mesh from any reader. The whole input is read before parsing.
pub fn load_obj_from_reader<R: Read>(mut reader: R) -> MeshResult<MeshData> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| SourceError::from_io("<reader>", e))?;
    parse_obj(&text)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> MeshResult<MeshData> {
    parse_obj(contents)
}

/// Per-file pools, filled in declaration order.
#[derive(Default)]
struct Pools {
    positions: Vec<Vec4>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
}

impl Pools {
    fn len(&self, pool: Pool) -> usize {
        match pool {
            Pool::Position => self.positions.len(),
            Pool::TexCoord => self.texcoords.len(),
            Pool::Normal => self.normals.len(),
        }
    }
}

/// Face corner with indices already resolved to 0-based pool slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Corner {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

fn parse_obj(text: &str) -> MeshResult<MeshData> {
    let mut pools = Pools::default();
    let mut mesh = MeshData::new();
    let mut corners: Vec<Corner> = Vec::new();
    let mut faces = 0usize;

    for (line_idx, raw) in text.lines().enumerate() {
        let line = line_idx + 1;
        let mut parts = raw.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let [x, y, z] =
                    parse_floats(&mut parts, line, ["x coordinate", "y coordinate", "z coordinate"])?;
                pools.positions.push(vec4(x, y, z, 1.0));
            }
            "vn" => {
                let [x, y, z] =
                    parse_floats(&mut parts, line, ["nx coordinate", "ny coordinate", "nz coordinate"])?;
                pools.normals.push(vec3(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats(&mut parts, line, ["u coordinate", "v coordinate"])?;
                pools.texcoords.push(vec2(u, v));
            }
            "f" => {
                corners.clear();
                for token in parts {
                    corners.push(parse_corner(token, &pools, line)?);
                }
                if corners.len() < 3 {
                    return Err(MeshError::MalformedFace {
                        line,
                        corners: corners.len(),
                    });
                }
                // Triangulate fan
                for i in 1..corners.len() - 1 {
                    emit_triangle(&mut mesh, &pools, [corners[0], corners[i], corners[i + 1]]);
                }
                faces += 1;
            }
            _ => {
                // Ignore other directives (#/o/g/s/usemtl/mtllib/etc.)
            }
        }
    }

    if faces == 0 {
        log::warn!("OBJ contained no faces");
    }
    log::debug!(
        "Parsed OBJ: {} positions, {} normals, {} texcoords, {} faces -> {} triangles",
        pools.positions.len(),
        pools.normals.len(),
        pools.texcoords.len(),
        faces,
        mesh.triangle_count()
    );

    Ok(mesh)
}

fn emit_triangle(mesh: &mut MeshData, pools: &Pools, tri: [Corner; 3]) {
    let p = tri.map(|c| pools.positions[c.position]);
    let (a, b, c) = (p[0].truncate(), p[1].truncate(), p[2].truncate());
    // Zero-area triangles get a zero normal instead of NaN.
    let face_normal = (b - a).cross(c - a).normalize_or_zero();

    for (corner, position) in tri.into_iter().zip(p) {
        let normal = corner.normal.map_or(face_normal, |n| pools.normals[n]);
        let uv = corner.texcoord.map_or(Vec2::ZERO, |t| pools.texcoords[t]);
        mesh.push(position, normal, uv);
    }
}

fn parse_floats<'a, const N: usize>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: [&'static str; N],
) -> MeshResult<[f32; N]> {
    let mut out = [0.0; N];
    for (slot, what) in out.iter_mut().zip(what) {
        *slot = parse_f32(parts.next(), line, what)?;
    }
    Ok(out)
}

fn parse_f32(value: Option<&str>, line: usize, what: &'static str) -> MeshResult<f32> {
    let token = value.unwrap_or_default();
    token.parse::<f32>().map_err(|_| MeshError::Parse {
        line,
        token: token.to_owned(),
        what,
    })
}

fn parse_corner(token: &str, pools: &Pools, line: usize) -> MeshResult<Corner> {
    // p, p/t, p//n or p/t/n
    if token.matches('/').count() > 2 {
        return Err(MeshError::Parse {
            line,
            token: token.to_owned(),
            what: "face corner",
        });
    }

    let mut split = token.split('/');
    let pos = split.next().unwrap_or_default();
    let position = resolve_index(pos, Pool::Position, pools, line)?;

    let texcoord = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, Pool::TexCoord, pools, line)?),
        _ => None,
    };

    let normal = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, Pool::Normal, pools, line)?),
        _ => None,
    };

    Ok(Corner {
        position,
        texcoord,
        normal,
    })
}

/// Resolve a 1-based (or negative, relative-to-end) index against what has been
/// declared so far.
fn resolve_index(token: &str, pool: Pool, pools: &Pools, line: usize) -> MeshResult<usize> {
    let raw = token.parse::<i64>().map_err(|_| MeshError::Parse {
        line,
        token: token.to_owned(),
        what: match pool {
            Pool::Position => "position index",
            Pool::TexCoord => "texcoord index",
            Pool::Normal => "normal index",
        },
    })?;

    let len = pools.len(pool);
    let out_of_range = || MeshError::IndexOutOfRange {
        line,
        pool,
        index: raw,
        len,
    };

    let len_i = i64::try_from(len).map_err(|_| out_of_range())?;
    let idx = match raw {
        0 => return Err(out_of_range()),
        r if r > 0 => r - 1,
        r => len_i + r,
    };

    if idx < 0 || idx >= len_i {
        return Err(out_of_range());
    }
    usize::try_from(idx).map_err(|_| out_of_range())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::MemorySource;

    const QUAD: &str = r#"
        # unit quad in the XY plane, CCW
        o quad
        v 0.0 0.0 0.0
        v 1.0 0.0 0.0
        v 1.0 1.0 0.0
        v 0.0 1.0 0.0
        vt 0.0 0.0
        vt 1.0 0.0
        vt 1.0 1.0
        vt 0.0 1.0
        s off
        f 1/1 2/2 3/3 4/4
    "#;

    fn assert_lengths_match(mesh: &MeshData, triangles: usize) {
        assert_eq!(mesh.positions.len(), 3 * triangles);
        assert_eq!(mesh.normals.len(), 3 * triangles);
        assert_eq!(mesh.texcoords.len(), 3 * triangles);
    }

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_lengths_match(&mesh, 1);
        assert!(mesh.is_valid());
        assert_eq!(mesh.positions[1], vec4(1.0, 0.0, 0.0, 1.0));
        assert_eq!(mesh.texcoords[2], vec2(0.0, 1.0));
        assert_eq!(mesh.normals[0], vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn quad_splits_into_two_fan_triangles() {
        let mesh = load_obj_from_str(QUAD).unwrap();
        assert_lengths_match(&mesh, 2);

        let a = vec4(0.0, 0.0, 0.0, 1.0);
        let b = vec4(1.0, 0.0, 0.0, 1.0);
        let c = vec4(1.0, 1.0, 0.0, 1.0);
        let d = vec4(0.0, 1.0, 0.0, 1.0);
        assert_eq!(mesh.triangle(0), Some([a, b, c]));
        assert_eq!(mesh.triangle(1), Some([a, c, d]));
        assert_eq!(&mesh.texcoords[3..6], &[vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)]);
    }

    #[test]
    fn ngon_yields_corner_count_minus_two_triangles() {
        let src = "v 0 0 0\nv 2 0 0\nv 3 1 0\nv 1 2 0\nv -1 1 0\nvt 0 0\n\
                   f 1/1 2/1 3/1 4/1 5/1\nf 1/1 2/1 3/1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_lengths_match(&mesh, 3 + 1);
        for i in 0..3 {
            assert_eq!(mesh.triangle(i).unwrap()[0], vec4(0.0, 0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn missing_normals_use_ccw_face_normal() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.normals, vec![vec3(0.0, 0.0, 1.0); 3]);

        // Reversed winding flips the normal.
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 3/1 2/1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.normals, vec![vec3(0.0, 0.0, -1.0); 3]);
    }

    #[test]
    fn face_normal_is_normalized_per_triangle() {
        let src = "v 0 0 0\nv 4 0 0\nv 4 0 -4\nv 0 0 -4\nvt 0 0\nf 1/1 2/1 3/1 4/1\n";
        let mesh = load_obj_from_str(src).unwrap();
        for n in &mesh.normals {
            assert!((*n - vec3(0.0, 1.0, 0.0)).length() < 1e-6, "{n:?}");
        }
    }

    #[test]
    fn explicit_and_computed_normals_mix_within_a_triangle() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nvt 0 0\nf 1/1/1 2/1 3/1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.normals[0], vec3(1.0, 0.0, 0.0));
        assert_eq!(mesh.normals[1], vec3(0.0, 0.0, 1.0));
        assert_eq!(mesh.normals[2], vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        let src = "v 0 0 0\nv 1 0 0\nv 2 0 0\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.normals, vec![Vec3::ZERO; 3]);
    }

    #[test]
    fn corner_without_texcoord_defaults_to_origin_uv() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_lengths_match(&mesh, 2);
        assert!(mesh.texcoords.iter().all(|t| *t == Vec2::ZERO));
        assert_eq!(mesh.normals[0], vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn negative_indices_count_back_from_latest_entry() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nf -3/-1 -2/-1 -1/-1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.triangle(0).unwrap()[2], vec4(0.0, 1.0, 0.0, 1.0));
        assert_eq!(mesh.texcoords[0], vec2(0.5, 0.5));
    }

    #[test]
    fn position_w_is_always_one() {
        let mesh = load_obj_from_str("v 1 2 3 0.5\nv 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.positions[0], vec4(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn no_faces_means_empty_output() {
        let mesh = load_obj_from_str("v 0 0 0\n# nothing else\n").unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(!mesh.is_valid());
    }

    #[test]
    fn bad_number_reports_line_and_token() {
        let err = load_obj_from_str("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        match err {
            MeshError::Parse { line, token, what } => {
                assert_eq!(line, 2);
                assert_eq!(token, "zero");
                assert_eq!(what, "y coordinate");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_coordinate_is_a_parse_error() {
        let err = load_obj_from_str("vt 0.5\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, ref token, .. } if token.is_empty()));
    }

    #[test]
    fn bad_index_token_is_a_parse_error() {
        let err = load_obj_from_str("v 0 0 0\nf 1 x 1\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Parse { line: 2, what: "position index", .. }
        ));
        let err = load_obj_from_str("v 0 0 0\nf 1/1/1/1 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { what: "face corner", .. }));
    }

    #[test]
    fn extra_corner_slot_is_rejected_before_index_lookup() {
        // Pools empty except positions: the shape error wins over range checks.
        let err = load_obj_from_str("v 0 0 0\nf 1/1/1/1 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Parse { line: 2, what: "face corner", ref token } if token == "1/1/1/1"
        ));

        let src = "v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1 1 9/9/9/\n";
        let err = load_obj_from_str(src).unwrap_err();
        assert!(matches!(err, MeshError::Parse { what: "face corner", .. }));
    }

    #[test]
    fn short_face_is_malformed() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedFace { line: 3, corners: 2 }));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange { line: 3, pool: Pool::Position, index: 3, len: 2 }
        ));

        let err = load_obj_from_str("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 0, .. }));

        let err = load_obj_from_str("v 0 0 0\nf -2 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: -2, .. }));
    }

    #[test]
    fn texcoord_reference_into_empty_pool_fails() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1 2/1 3/1\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange { pool: Pool::TexCoord, len: 0, .. }
        ));
    }

    #[test]
    fn forward_references_are_rejected() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\n";
        let err = load_obj_from_str(src).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { line: 3, .. }));

        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//1 3//1\nvn 0 0 1\n";
        let err = load_obj_from_str(src).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { pool: Pool::Normal, .. }));
    }

    #[test]
    fn load_through_text_source() {
        let src = MemorySource::new().with("quad.obj", QUAD);
        let mesh = load_obj(&src, "quad.obj").unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        let err = load_obj(&src, "missing.obj").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Source(SourceError::ResourceNotFound { ref name }) if name == "missing.obj"
        ));
    }

    #[test]
    fn load_from_reader_and_missing_path() {
        let mesh = load_obj_from_reader(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        let err = load_obj_from_path(std::env::temp_dir().join("no-such-mesh-1b2c.obj")).unwrap_err();
        assert!(matches!(err, MeshError::Source(ref e) if e.is_not_found()));
    }

    #[test]
    fn bundled_pyramid_scene() {
        let mesh = load_obj_from_str(include_str!("../../../assets/pyramid.obj")).unwrap();
        // base quad + four sides + ground quad
        assert_eq!(mesh.triangle_count(), 2 + 4 + 2);
        assert!(mesh.is_valid());
        assert!(mesh.normals[..6].iter().all(|n| *n == vec3(0.0, -1.0, 0.0)));
        for n in &mesh.normals[6..18] {
            assert!(n.y > 0.0 && (n.length() - 1.0).abs() < 1e-5, "{n:?}");
        }
        for n in &mesh.normals[18..] {
            assert!((*n - Vec3::Y).length() < 1e-6, "{n:?}");
        }
    }
}

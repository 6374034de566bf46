use std::io::BufRead;
use std::path::Path;

use log::{debug, trace};
use ve_format::MeshBuffers;

use super::builder::{ObjFace, ObjFaceIndex, ObjMeshBuilder};
use super::error::{LoadError, Result};
use super::meta::{ObjMeta, ParseMode};

/// A whitespace tokenized line.
#[derive(Debug)]
struct Record<'a> {
    line: usize,
    tag: &'a str,
    fields: Vec<&'a str>,
}

impl Record<'_> {
    fn malformed(&self, field: impl Into<String>, reason: impl Into<String>) -> LoadError {
        LoadError::malformed(self.line, field, reason)
    }
}

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file), restricted to
// triangulated meshes with position/texcoord/normal on every face corner
pub(crate) fn parse<R: BufRead>(reader: R, meta: ObjMeta, origin: &Path) -> Result<MeshBuffers> {
    let mut builder = ObjMeshBuilder::new(meta);

    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::unavailable(origin, e))?;
        parse_line(n + 1, &line, &mut builder)?;
    }

    debug!(
        "Parsed {} positions, {} texcoords, {} normals, {} faces from `{}`",
        builder.positions.len(),
        builder.uvs.len(),
        builder.normals.len(),
        builder.face_count(),
        origin.display()
    );

    Ok(builder.build())
}

fn parse_line(line: usize, text: &str, builder: &mut ObjMeshBuilder) -> Result<()> {
    let mut tokens = text.split_whitespace();
    let tag = match tokens.next() {
        Some(tag) => tag,
        None => return Ok(()),
    };

    let record = Record {
        line,
        tag,
        fields: tokens.collect(),
    };
    parse_token(&record, builder)
}

fn parse_token(record: &Record, builder: &mut ObjMeshBuilder) -> Result<()> {
    let mode = builder.meta.mode;

    match record.tag {
        // material library, textures are bound by the scene instead
        "mtllib" => trace!("Ignoring material library on line {}", record.line),
        "usemtl" => match record.fields.first() {
            Some(name) => builder.set_material(name),
            None if mode == ParseMode::Lenient => {
                debug!("Line {}: `usemtl` without a name, keeping `{}`", record.line, builder.curr_material)
            }
            None => return Err(record.malformed("usemtl", "missing material name")),
        },
        "v" => builder.push_vertex(parse_floats(record, ["x", "y", "z"], mode)?),
        "vt" => builder.push_uv(parse_floats(record, ["u", "v"], mode)?),
        "vn" => builder.push_normal(parse_floats(record, ["x", "y", "z"], mode)?),
        "f" => builder.push_face(record.line, &parse_face(record, mode)?)?,
        // comments, object names, groups, smoothing groups, ...
        _ => trace!("Ignoring `{}` on line {}", record.tag, record.line),
    };

    Ok(())
}

// reads the first N fields as floats; trailing fields (w, vertex colors) are ignored
fn parse_floats<const N: usize>(record: &Record, names: [&str; N], mode: ParseMode) -> Result<[f32; N]> {
    let mut out = [0.0; N];

    for (i, (value, name)) in out.iter_mut().zip(names.iter()).enumerate() {
        let field = || format!("{}.{}", record.tag, name);

        *value = match (record.fields.get(i), mode) {
            (Some(token), ParseMode::Strict) => token
                .parse()
                .map_err(|_| record.malformed(field(), format!("`{}` is not a number", token)))?,
            (None, ParseMode::Strict) => {
                return Err(record.malformed(field(), format!("expected {} numbers, found {}", N, record.fields.len())))
            }
            (Some(token), ParseMode::Lenient) => token.parse().unwrap_or_else(|_| {
                debug!("Line {}: `{}` is not a number, reading 0", record.line, token);
                0.0
            }),
            (None, ParseMode::Lenient) => 0.0,
        };
    }

    Ok(out)
}

fn parse_face(record: &Record, mode: ParseMode) -> Result<ObjFace> {
    let corners = record.fields.len();
    if corners < 3 || (corners > 3 && mode == ParseMode::Strict) {
        return Err(record.malformed(
            "f",
            format!("expected exactly 3 corners, found {}", corners),
        ));
    }
    if corners > 3 {
        debug!("Line {}: face has {} corners, using the first 3", record.line, corners);
    }

    let mut face = ObjFace::default();
    for (n, corner) in face.face_i.iter_mut().enumerate() {
        *corner = parse_face_index(record, n, mode)?;
    }

    Ok(face)
}

// parses a single `p/t/n` corner
fn parse_face_index(record: &Record, n: usize, mode: ParseMode) -> Result<ObjFaceIndex> {
    let token = record.fields[n];
    let parts: Vec<&str> = token.split('/').collect();

    if parts.len() < 3 || (parts.len() > 3 && mode == ParseMode::Strict) {
        return Err(record.malformed(
            format!("f[{}]", n + 1),
            format!("expected `position/texcoord/normal`, found `{}`", token),
        ));
    }

    let index = |i: usize, component: &str| -> Result<usize> {
        parts[i].parse().map_err(|_| {
            record.malformed(
                format!("f[{}].{}", n + 1, component),
                format!("`{}` is not a positive index", parts[i]),
            )
        })
    };

    Ok(ObjFaceIndex {
        vert_i: index(0, "position")?,
        uv_i: index(1, "texcoord")?,
        normal_i: index(2, "normal")?,
    })
}

use super::{triangulate_fan, MeshLoadError, MeshReader};
use crate::math::{Point, Real};
use crate::shape::Mesh;
use std::io::{BufRead, ErrorKind};

/// Reader of Stanford `.ply` files.
///
/// The `ascii`, `binary_little_endian` and `binary_big_endian` encodings are supported.
/// Vertex positions are read from the `x`, `y` and `z` properties of the `vertex`
/// element, and polygons from the `vertex_indices` (or `vertex_index`) list of the
/// `face` element. Every other element and property is skipped.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlyReader;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Encoding {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScalarType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl ScalarType {
    fn parse(name: &str) -> Option<Self> {
        let ty = match name {
            "char" | "int8" => ScalarType::Int8,
            "uchar" | "uint8" => ScalarType::UInt8,
            "short" | "int16" => ScalarType::Int16,
            "ushort" | "uint16" => ScalarType::UInt16,
            "int" | "int32" => ScalarType::Int32,
            "uint" | "uint32" => ScalarType::UInt32,
            "float" | "float32" => ScalarType::Float32,
            "double" | "float64" => ScalarType::Float64,
            _ => return None,
        };
        Some(ty)
    }

    fn is_integer(self) -> bool {
        !matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PropertyKind {
    Scalar(ScalarType),
    List { count: ScalarType, item: ScalarType },
}

#[derive(Clone, Debug)]
struct Property {
    name: String,
    kind: PropertyKind,
}

#[derive(Clone, Debug)]
struct Element {
    name: String,
    count: usize,
    properties: Vec<Property>,
}

impl Element {
    fn property(&self, names: &[&str]) -> Option<usize> {
        self.properties
            .iter()
            .position(|p| names.contains(&p.name.as_str()))
    }
}

#[derive(Clone, Debug)]
struct Header {
    encoding: Encoding,
    elements: Vec<Element>,
}

fn parse_error(message: impl Into<String>) -> MeshLoadError {
    MeshLoadError::Parse(message.into())
}

/// Reports text that isn't valid UTF-8 as a malformed file.
fn text_error(err: std::io::Error, what: &str) -> MeshLoadError {
    if err.kind() == ErrorKind::InvalidData {
        parse_error(format!("the PLY {} is not valid UTF-8 text", what))
    } else {
        MeshLoadError::Io(err)
    }
}

fn parse_header(input: &mut dyn BufRead) -> Result<Header, MeshLoadError> {
    let mut line = String::new();
    let mut line_id = 0;
    let mut encoding = None;
    let mut elements: Vec<Element> = Vec::new();

    loop {
        line.clear();
        if input
            .read_line(&mut line)
            .map_err(|e| text_error(e, "header"))?
            == 0
        {
            return Err(parse_error("unexpected end of file inside the PLY header"));
        }
        line_id += 1;

        let mut words = line.split_whitespace();
        let keyword = words.next();

        if line_id == 1 {
            if keyword != Some("ply") {
                return Err(parse_error("missing `ply` magic number"));
            }
            continue;
        }

        match keyword {
            None | Some("comment") | Some("obj_info") => {}
            Some("format") => {
                encoding = Some(match words.next() {
                    Some("ascii") => Encoding::Ascii,
                    Some("binary_little_endian") => Encoding::BinaryLittleEndian,
                    Some("binary_big_endian") => Encoding::BinaryBigEndian,
                    other => {
                        return Err(parse_error(format!(
                            "line {}: unknown PLY format {:?}",
                            line_id,
                            other.unwrap_or_default()
                        )))
                    }
                });
            }
            Some("element") => {
                let (Some(name), Some(count)) = (words.next(), words.next()) else {
                    return Err(parse_error(format!(
                        "line {}: incomplete element declaration",
                        line_id
                    )));
                };
                let count = count.parse().map_err(|_| {
                    parse_error(format!("line {}: invalid element count `{}`", line_id, count))
                })?;
                elements.push(Element {
                    name: name.to_string(),
                    count,
                    properties: vec![],
                });
            }
            Some("property") => {
                let scalar = |name: Option<&str>| {
                    name.and_then(ScalarType::parse).ok_or_else(|| {
                        parse_error(format!(
                            "line {}: unknown property type {:?}",
                            line_id,
                            name.unwrap_or_default()
                        ))
                    })
                };

                let kind = match words.next() {
                    Some("list") => PropertyKind::List {
                        count: scalar(words.next())?,
                        item: scalar(words.next())?,
                    },
                    ty => PropertyKind::Scalar(scalar(ty)?),
                };
                let name = words.next().ok_or_else(|| {
                    parse_error(format!("line {}: property without a name", line_id))
                })?;
                let element = elements.last_mut().ok_or_else(|| {
                    parse_error(format!(
                        "line {}: property `{}` declared before any element",
                        line_id, name
                    ))
                })?;
                element.properties.push(Property {
                    name: name.to_string(),
                    kind,
                });
            }
            Some("end_header") => break,
            Some(other) => {
                return Err(parse_error(format!(
                    "line {}: unexpected header keyword `{}`",
                    line_id, other
                )))
            }
        }
    }

    let encoding = encoding.ok_or_else(|| parse_error("missing `format` line in the PLY header"))?;
    Ok(Header { encoding, elements })
}

/// A stream of scalar values making up the body of a PLY file.
trait ScalarSource {
    fn next_scalar(&mut self, ty: ScalarType) -> Result<f64, MeshLoadError>;
}

struct AsciiSource<I> {
    tokens: I,
}

impl<'a, I: Iterator<Item = &'a str>> ScalarSource for AsciiSource<I> {
    fn next_scalar(&mut self, ty: ScalarType) -> Result<f64, MeshLoadError> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| parse_error("unexpected end of the PLY body"))?;

        if ty.is_integer() {
            token
                .parse::<i64>()
                .map(|v| v as f64)
                .map_err(|_| parse_error(format!("expected an integer, found `{}`", token)))
        } else {
            token
                .parse::<f64>()
                .map_err(|_| parse_error(format!("expected a number, found `{}`", token)))
        }
    }
}

struct BinarySource<'a> {
    input: &'a mut dyn BufRead,
    big_endian: bool,
}

impl BinarySource<'_> {
    fn bytes<const N: usize>(&mut self) -> Result<[u8; N], MeshLoadError> {
        let mut buf = [0; N];
        self.input.read_exact(&mut buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                parse_error("unexpected end of the PLY body")
            } else {
                MeshLoadError::Io(e)
            }
        })?;

        if self.big_endian {
            buf.reverse();
        }
        Ok(buf)
    }
}

impl ScalarSource for BinarySource<'_> {
    fn next_scalar(&mut self, ty: ScalarType) -> Result<f64, MeshLoadError> {
        // The bytes are reversed for big-endian files so they can always be decoded as little-endian.
        let value = match ty {
            ScalarType::Int8 => i8::from_le_bytes(self.bytes()?) as f64,
            ScalarType::UInt8 => u8::from_le_bytes(self.bytes()?) as f64,
            ScalarType::Int16 => i16::from_le_bytes(self.bytes()?) as f64,
            ScalarType::UInt16 => u16::from_le_bytes(self.bytes()?) as f64,
            ScalarType::Int32 => i32::from_le_bytes(self.bytes()?) as f64,
            ScalarType::UInt32 => u32::from_le_bytes(self.bytes()?) as f64,
            ScalarType::Float32 => f32::from_le_bytes(self.bytes()?) as f64,
            ScalarType::Float64 => f64::from_le_bytes(self.bytes()?),
        };
        Ok(value)
    }
}

fn list_len(value: f64) -> Result<usize, MeshLoadError> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(parse_error(format!("invalid list length {}", value)))
    }
}

fn vertex_index(value: f64) -> Result<u32, MeshLoadError> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(parse_error(format!("invalid vertex index {}", value)))
    }
}

fn skip_property(source: &mut dyn ScalarSource, kind: PropertyKind) -> Result<(), MeshLoadError> {
    match kind {
        PropertyKind::Scalar(ty) => {
            let _ = source.next_scalar(ty)?;
        }
        PropertyKind::List { count, item } => {
            let len = list_len(source.next_scalar(count)?)?;
            for _ in 0..len {
                let _ = source.next_scalar(item)?;
            }
        }
    }
    Ok(())
}

fn read_vertices(
    element: &Element,
    source: &mut dyn ScalarSource,
    vertices: &mut Vec<Point<Real>>,
) -> Result<(), MeshLoadError> {
    let coords = [
        element.property(&["x"]),
        element.property(&["y"]),
        element.property(&["z"]),
    ];

    for (coord, id) in ["x", "y", "z"].iter().zip(coords.iter()) {
        match id.map(|id| element.properties[id].kind) {
            Some(PropertyKind::Scalar(_)) => {}
            Some(PropertyKind::List { .. }) => {
                return Err(parse_error(format!(
                    "the vertex property `{}` must be a scalar",
                    coord
                )))
            }
            None => {
                return Err(parse_error(format!(
                    "the vertex element has no `{}` property",
                    coord
                )))
            }
        }
    }

    for _ in 0..element.count {
        let mut pt = Point::origin();

        for (id, property) in element.properties.iter().enumerate() {
            match property.kind {
                PropertyKind::Scalar(ty) => {
                    let value = source.next_scalar(ty)?;
                    if let Some(dim) = coords.iter().position(|c| *c == Some(id)) {
                        pt[dim] = value as Real;
                    }
                }
                kind => skip_property(source, kind)?,
            }
        }

        vertices.push(pt);
    }

    Ok(())
}

fn read_faces(
    element: &Element,
    source: &mut dyn ScalarSource,
    indices: &mut Vec<[u32; 3]>,
) -> Result<(), MeshLoadError> {
    let list = element
        .property(&["vertex_indices", "vertex_index"])
        .ok_or_else(|| parse_error("the face element has no `vertex_indices` property"))?;

    let PropertyKind::List { count, item } = element.properties[list].kind else {
        return Err(parse_error("the face property `vertex_indices` must be a list"));
    };

    let mut polygon = Vec::new();

    for _ in 0..element.count {
        for (id, property) in element.properties.iter().enumerate() {
            if id == list {
                let len = list_len(source.next_scalar(count)?)?;
                polygon.clear();
                for _ in 0..len {
                    polygon.push(vertex_index(source.next_scalar(item)?)?);
                }
                triangulate_fan(&polygon, indices)?;
            } else {
                skip_property(source, property.kind)?;
            }
        }
    }

    Ok(())
}

fn read_body(header: &Header, source: &mut dyn ScalarSource) -> Result<Mesh, MeshLoadError> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for element in &header.elements {
        match element.name.as_str() {
            "vertex" => read_vertices(element, source, &mut vertices)?,
            "face" => read_faces(element, source, &mut indices)?,
            _ => {
                log::debug!(
                    "skipping {} instances of the PLY element `{}`",
                    element.count,
                    element.name
                );
                for _ in 0..element.count {
                    for property in &element.properties {
                        skip_property(source, property.kind)?;
                    }
                }
            }
        }
    }

    Ok(Mesh::new(vertices, indices)?)
}

impl MeshReader for PlyReader {
    fn read(&self, input: &mut dyn BufRead) -> Result<Mesh, MeshLoadError> {
        let header = parse_header(input)?;

        match header.encoding {
            Encoding::Ascii => {
                let mut body = String::new();
                let _ = input
                    .read_to_string(&mut body)
                    .map_err(|e| text_error(e, "body"))?;
                let mut source = AsciiSource {
                    tokens: body.split_whitespace(),
                };
                read_body(&header, &mut source)
            }
            Encoding::BinaryLittleEndian | Encoding::BinaryBigEndian => {
                let mut source = BinarySource {
                    input,
                    big_endian: header.encoding == Encoding::BinaryBigEndian,
                };
                read_body(&header, &mut source)
            }
        }
    }
}

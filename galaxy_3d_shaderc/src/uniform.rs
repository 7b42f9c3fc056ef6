/// Uniform descriptors recovered from optimized shader source
///
/// A [`Uniform`] describes one externally bindable input (scalar, vector,
/// matrix, sampler or texture). Scanners append them to a [`UniformTable`] in
/// source order; the table is then handed by value to the blob writer.

use std::fmt;

/// Uniform type as stored in the blob
///
/// Discriminants are the wire values read by the runtime loader. Value 1 is
/// reserved by the loader and never produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UniformType {
    /// Integer handle (samplers and textures are bound through it)
    Int = 0,
    /// Four-component float vector
    Vec4 = 2,
    /// 3x3 float matrix
    Mat3 = 3,
    /// 4x4 float matrix
    Mat4 = 4,
    /// Unrecognized type name, never added to a table
    Unknown = 0xff,
}

impl UniformType {
    /// Map a GL-style or C-like type name to a uniform type
    ///
    /// Names starting with `sampler`, `isampler` or `usampler` are integer
    /// handles. Unrecognized names map to [`UniformType::Unknown`].
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("sampler")
            || name.starts_with("isampler")
            || name.starts_with("usampler")
        {
            return UniformType::Int;
        }

        match name {
            "int" => UniformType::Int,
            "vec4" | "float4" => UniformType::Vec4,
            "mat3" | "float3x3" => UniformType::Mat3,
            "mat4" | "float4x4" => UniformType::Mat4,
            _ => UniformType::Unknown,
        }
    }

    /// Inverse of the wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(UniformType::Int),
            2 => Some(UniformType::Vec4),
            3 => Some(UniformType::Mat3),
            4 => Some(UniformType::Mat4),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Registers consumed by one array element (matrix row count, else 1)
    pub fn register_rows(self) -> u16 {
        match self {
            UniformType::Mat3 => 3,
            UniformType::Mat4 => 4,
            _ => 1,
        }
    }

    /// Shading-language name used in logs
    pub fn name(self) -> &'static str {
        match self {
            UniformType::Int => "int",
            UniformType::Vec4 => "vec4",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 => "mat4",
            UniformType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recovered binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uniform {
    pub name: String,
    pub kind: UniformType,
    /// Array element count (1 for non-arrays)
    pub num: u8,
    /// First register slot
    pub reg_index: u16,
    /// Registers consumed
    pub reg_count: u16,
    /// Texture metadata carried through unchanged
    pub tex_component: u8,
    pub tex_dimension: u8,
    pub tex_format: u8,
}

impl Uniform {
    /// Declaration from a GL-style header: matrices consume one register per row
    pub fn declared(name: impl Into<String>, kind: UniformType, num: u8) -> Self {
        Self {
            name: name.into(),
            kind,
            num,
            reg_index: 0,
            reg_count: u16::from(num) * kind.register_rows(),
            tex_component: 0,
            tex_dimension: 0,
            tex_format: 0,
        }
    }

    /// Field of a C-like uniform struct: one register per array element
    pub fn struct_field(name: impl Into<String>, kind: UniformType, num: u8) -> Self {
        Self {
            reg_count: u16::from(num),
            ..Self::declared(name, kind, num)
        }
    }

    /// Texture bound through an explicit slot annotation
    pub fn texture(name: impl Into<String>, reg_index: u16) -> Self {
        Self {
            reg_index,
            ..Self::struct_field(name, UniformType::Int, 1)
        }
    }
}

/// Ordered, append-only uniform table
///
/// Insertion order is first-seen order in the source. Duplicate names are
/// kept: the table is a name list, not a name set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformTable {
    uniforms: Vec<Uniform>,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a uniform; entries of unknown type are dropped
    ///
    /// Returns `true` when the uniform was added.
    pub fn push(&mut self, uniform: Uniform) -> bool {
        if uniform.kind == UniformType::Unknown {
            crate::shaderc_trace!("galaxy3d::shaderc::Uniform",
                "dropping '{}' (unsupported type)", uniform.name);
            return false;
        }

        crate::shaderc_trace!("galaxy3d::shaderc::Uniform",
            "name: {} (type {}, num {}, reg {}+{})",
            uniform.name, uniform.kind, uniform.num, uniform.reg_index, uniform.reg_count);
        self.uniforms.push(uniform);
        true
    }

    /// Append every entry of `other`, keeping its order
    pub fn extend(&mut self, other: UniformTable) {
        self.uniforms.extend(other.uniforms);
    }

    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Uniform> {
        self.uniforms.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Uniform> {
        self.uniforms.get(index)
    }

    /// First uniform with the given name
    pub fn find(&self, name: &str) -> Option<&Uniform> {
        self.uniforms.iter().find(|u| u.name == name)
    }
}

impl<'a> IntoIterator for &'a UniformTable {
    type Item = &'a Uniform;
    type IntoIter = std::slice::Iter<'a, Uniform>;

    fn into_iter(self) -> Self::IntoIter {
        self.uniforms.iter()
    }
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;

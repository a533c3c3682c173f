//! C# declaration synthesis.
//!
//! Total over any [`TypeSet`]: every [`TypeRef`] has a spelling, `Unknown`
//! being `object`. Root type first, then nested types in discovery order,
//! all inside one block-scoped namespace.

use crate::ir::{Field, InferredType, Scalar, TypeRef, TypeSet};
use crate::naming::{serialization_key, to_pascal_case};
use crate::settings::{ContainerStyle, ConversionSettings, PropertyAccess};

const INDENT: &str = "    ";
const SERIALIZATION_IMPORT: &str = "using System.Text.Json.Serialization;";

/// Declaration shape, decided once per run from the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationStyle {
    Class,
    RecordBody,
    RecordConstructor,
}

impl DeclarationStyle {
    pub fn from_settings(settings: &ConversionSettings) -> Self {
        match (settings.use_records, settings.use_primary_constructor) {
            (false, _) => DeclarationStyle::Class,
            (true, false) => DeclarationStyle::RecordBody,
            (true, true) => DeclarationStyle::RecordConstructor,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            DeclarationStyle::Class => "class",
            DeclarationStyle::RecordBody | DeclarationStyle::RecordConstructor => "record",
        }
    }
}

pub fn synthesize(types: &TypeSet, settings: &ConversionSettings) -> String {
    let mut cg = Codegen::new(settings);
    cg.emit(types);
    cg.into_string()
}

pub struct Codegen<'a> {
    settings: &'a ConversionSettings,
    style: DeclarationStyle,
    out: String,
    depth: usize,
}

impl<'a> Codegen<'a> {
    pub fn new(settings: &'a ConversionSettings) -> Self {
        Self {
            settings,
            style: DeclarationStyle::from_settings(settings),
            out: String::new(),
            depth: 0,
        }
    }

    pub fn into_string(self) -> String { self.out }

    pub fn emit(&mut self, types: &TypeSet) {
        if self.settings.emit_serialization_attribute {
            self.line(SERIALIZATION_IMPORT);
            self.blank();
        }
        self.line(&format!("namespace {}", self.settings.module_name));
        self.line("{");
        self.depth += 1;
        for (i, ty) in types.declaration_order().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.emit_declaration(ty);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn emit_declaration(&mut self, ty: &InferredType) {
        let head = format!("public {} {}", self.style.keyword(), ty.name);
        match self.style {
            DeclarationStyle::RecordConstructor => self.emit_parameter_list(&head, &ty.fields),
            DeclarationStyle::Class | DeclarationStyle::RecordBody => {
                self.line(&head);
                self.line("{");
                self.depth += 1;
                for (i, field) in ty.fields.iter().enumerate() {
                    // blank line between attributed members
                    if i > 0 && self.settings.emit_serialization_attribute {
                        self.blank();
                    }
                    self.emit_property(field);
                }
                self.depth -= 1;
                self.line("}");
            }
        }
    }

    fn emit_property(&mut self, field: &Field) {
        let s = self.settings;
        if s.emit_serialization_attribute {
            self.line(&format!("[JsonPropertyName(\"{}\")]", serialization_key(&field.original_key)));
        }

        let mut decl = String::from("public ");
        if s.is_required {
            decl.push_str("required ");
        }
        decl.push_str(&self.field_type(&field.ty));
        decl.push(' ');
        decl.push_str(&to_pascal_case(&field.original_key));
        match s.property_access {
            PropertyAccess::Mutable => decl.push_str(" { get; set; }"),
            PropertyAccess::Immutable => decl.push_str(" { get; init; }"),
            PropertyAccess::None => {}
        }
        let initializer = if s.default_initialize && !s.is_nullable {
            default_literal(&field.ty)
        } else {
            None
        };
        match (initializer, s.property_access) {
            (Some(lit), _) => decl.push_str(&format!(" = {lit};")),
            (None, PropertyAccess::None) => decl.push(';'),
            (None, _) => {}
        }
        self.line(&decl);
    }

    fn emit_parameter_list(&mut self, head: &str, fields: &[Field]) {
        if fields.is_empty() {
            self.line(&format!("{head}();"));
            return;
        }
        self.line(&format!("{head}("));
        self.depth += 1;
        let last = fields.len() - 1;
        let mut defaulting = false;
        for (i, field) in fields.iter().enumerate() {
            let mut param = String::new();
            if self.settings.emit_serialization_attribute {
                param.push_str(&format!(
                    "[property: JsonPropertyName(\"{}\")] ",
                    serialization_key(&field.original_key)
                ));
            }
            param.push_str(&self.field_type(&field.ty));
            param.push(' ');
            param.push_str(&to_pascal_case(&field.original_key));
            if let Some(lit) = self.parameter_default(&field.ty, &mut defaulting) {
                param.push_str(" = ");
                param.push_str(lit);
            }
            param.push_str(if i == last { ");" } else { "," });
            self.line(&param);
        }
        self.depth -= 1;
    }

    /// Base spelling plus the nullable marker when it applies.
    fn field_type(&self, ty: &TypeRef) -> String {
        let base = spell(ty, self.settings.container_style);
        if self.settings.is_nullable && !self.settings.default_initialize {
            format!("{base}?")
        } else {
            base
        }
    }

    // Parameter defaults must be compile-time constants. The first
    // parameter with a table literal starts the defaulted tail; every later
    // parameter needs a default too.
    fn parameter_default(&self, ty: &TypeRef, defaulting: &mut bool) -> Option<&'static str> {
        if !self.settings.default_initialize || self.settings.is_nullable {
            return None;
        }
        *defaulting |= default_literal(ty).is_some();
        if !*defaulting {
            return None;
        }
        Some(match ty {
            TypeRef::Scalar(Scalar::String) => "\"\"",
            _ => "default",
        })
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) { self.out.push('\n'); }
}

/// C# spelling of a type reference, without nullability.
pub fn spell(ty: &TypeRef, container: ContainerStyle) -> String {
    match ty {
        TypeRef::Scalar(s) => scalar_keyword(*s).to_string(),
        TypeRef::Reference(name) => name.clone(),
        TypeRef::Container(inner) => {
            let element = spell(inner, container);
            match container {
                ContainerStyle::ReadOnlyList => format!("IReadOnlyList<{element}>"),
                ContainerStyle::List => format!("List<{element}>"),
                ContainerStyle::Array => format!("{element}[]"),
            }
        }
    }
}

fn scalar_keyword(s: Scalar) -> &'static str {
    match s {
        Scalar::Integer => "int",
        Scalar::Float => "double",
        Scalar::Boolean => "bool",
        Scalar::DateTime => "DateTime",
        Scalar::String => "string",
        Scalar::Unknown => "object",
    }
}

/// Initializer for a non-nullable property, if its type has one.
pub fn default_literal(ty: &TypeRef) -> Option<&'static str> {
    match ty {
        TypeRef::Scalar(Scalar::String) => Some("\"\""),
        TypeRef::Container(_) => Some("[]"),
        TypeRef::Reference(_) => Some("new()"),
        TypeRef::Scalar(_) => None,
    }
}

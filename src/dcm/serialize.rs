//! DCM serialization.
//!
//! Renders a [`Document`] back to the textual grammar the reader accepts:
//! header comments, the format directive, the document-level sections, then
//! every element in `(function, description, name)` order. Arrays are wrapped
//! across lines of the same keyword, six values per line by default.

use std::fmt::{self, Display, Write};

use itertools::Itertools;

use crate::model::{Attributes, Document, Element, ElementData, Function};
use crate::value::Value;

/// Values per line used when no other width is configured.
pub const VALUES_PER_LINE: usize = 6;

/// A string written between double quotes.
struct Quoted<'a>(&'a str);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

/// A token that is quoted only when it would not read back as one token.
struct Token<'a>(&'a str);

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() || self.0.contains(char::is_whitespace) {
            Quoted(self.0).fmt(f)
        } else {
            f.write_str(self.0)
        }
    }
}

/// Line-oriented DCM emitter over any [`fmt::Write`] sink.
pub struct DcmWriter<W: Write> {
    out: W,
    values_per_line: usize,
}

impl<W: Write> DcmWriter<W> {
    /// A width of 0 is treated as 1.
    pub fn new(out: W, values_per_line: usize) -> Self {
        Self {
            out,
            values_per_line: values_per_line.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one indented `KEY value` line.
    pub fn write_field(&mut self, key: &str, value: impl Display) -> fmt::Result {
        writeln!(self.out, "  {key: <13} {value}")
    }

    /// Write a quoted string field, only if present.
    pub fn write_optional_field(&mut self, key: &str, value: Option<&str>) -> fmt::Result {
        match value {
            Some(value) => self.write_field(key, Quoted(value)),
            None => Ok(()),
        }
    }

    /// Write `values` under `key`, wrapped to the configured width.
    pub fn write_values<I>(&mut self, key: &str, values: I) -> fmt::Result
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for chunk in &values.into_iter().chunks(self.values_per_line) {
            self.write_field(key, chunk.format(" "))?;
        }
        Ok(())
    }

    /// Write one array row as `WERT`, or as `TEXT` when it holds text cells.
    fn write_row(&mut self, row: &[Value]) -> fmt::Result {
        let key = if row.iter().any(Value::is_text) {
            "TEXT"
        } else {
            "WERT"
        };
        self.write_values(key, row)
    }

    pub fn write_function(&mut self, function: &Function) -> fmt::Result {
        writeln!(
            self.out,
            "  FKT {} {} {}",
            Token(&function.name),
            Quoted(&function.version),
            Quoted(&function.description)
        )
    }

    pub fn write_document(&mut self, document: &Document) -> fmt::Result {
        // Every header line ends with a newline, so `lines` sees them all.
        self.write_comment_lines(document.header.lines())?;
        if !document.header.is_empty() {
            writeln!(self.out)?;
        }

        writeln!(self.out, "KONSERVIERUNG_FORMAT {}", document.format_version)?;
        for module_header in &document.module_headers {
            writeln!(
                self.out,
                "MODULKOPF {} {}",
                module_header.key,
                Quoted(&module_header.text)
            )?;
        }

        if !document.functions.is_empty() {
            writeln!(self.out, "\nFUNKTIONEN")?;
            for function in document.sorted_functions() {
                self.write_function(function)?;
            }
            writeln!(self.out, "END")?;
        }

        if !document.variant_coding.is_empty() {
            writeln!(self.out, "\nVARIANTENKODIERUNG")?;
            for criterion in &document.variant_coding {
                write!(self.out, "  KRITERIUM {}", Token(&criterion.name))?;
                for value in &criterion.values {
                    write!(self.out, " {}", Token(value))?;
                }
                writeln!(self.out)?;
            }
            writeln!(self.out, "END")?;
        }

        for element in document.sorted_elements() {
            writeln!(self.out)?;
            self.write_element(element)?;
        }
        Ok(())
    }

    pub fn write_element(&mut self, element: &Element) -> fmt::Result {
        let kind = element.kind();
        write!(self.out, "{kind} {}", element.name())?;
        match &element.data {
            ElementData::Parameter(_) => {}
            ElementData::ParameterBlock(block) => {
                write!(self.out, " {}", block.x_dimension)?;
                if block.is_two_dimensional() {
                    write!(self.out, " @ {}", block.y_dimension)?;
                }
            }
            ElementData::CharacteristicLine(line) => write!(self.out, " {}", line.x_dimension)?,
            ElementData::CharacteristicMap(map) => {
                write!(self.out, " {} {}", map.x_dimension, map.y_dimension)?
            }
            ElementData::Distribution(distribution) => {
                write!(self.out, " {}", distribution.x_dimension)?
            }
        }
        writeln!(self.out)?;

        self.write_attributes(&element.attributes)?;

        match &element.data {
            ElementData::Parameter(parameter) => match &parameter.value {
                Some(Value::Number(number)) => self.write_field("WERT", number)?,
                Some(Value::Text(text)) => self.write_field("TEXT", Quoted(text))?,
                None => {}
            },
            ElementData::ParameterBlock(block) => {
                for row in &block.values {
                    self.write_row(row)?;
                }
            }
            ElementData::CharacteristicLine(line) => {
                self.write_values("ST/X", line.values.keys())?;
                let values: Vec<Value> = line.values.values().cloned().collect();
                self.write_row(&values)?;
            }
            ElementData::CharacteristicMap(map) => {
                self.write_values("ST/X", map.x_coordinates())?;
                for (y, row) in &map.values {
                    self.write_field("ST/Y", y)?;
                    let values: Vec<Value> = row.values().cloned().collect();
                    self.write_row(&values)?;
                }
            }
            ElementData::Distribution(distribution) => {
                self.write_values("ST/X", &distribution.values)?;
            }
        }

        for (name, value) in &element.attributes.variants {
            self.write_field("VAR", format_args!("{name}={value}"))?;
        }
        writeln!(self.out, "END")
    }

    fn write_comment_lines<'a>(&mut self, lines: impl Iterator<Item = &'a str>) -> fmt::Result {
        for line in lines {
            if line.is_empty() {
                writeln!(self.out, "*")?;
            } else {
                writeln!(self.out, "* {line}")?;
            }
        }
        Ok(())
    }

    fn write_attributes(&mut self, attributes: &Attributes) -> fmt::Result {
        if let Some(comment) = &attributes.comment {
            // Lines are joined by '\n'; empty segments are empty comment lines.
            self.write_comment_lines(comment.split('\n'))?;
        }
        self.write_optional_field("LANGNAME", attributes.description.as_deref())?;
        self.write_optional_field("FUNKTION", attributes.function.as_deref())?;
        if let Some(display_name) = &attributes.display_name {
            self.write_field("DISPLAYNAME", display_name)?;
        }
        self.write_optional_field("EINHEIT_X", attributes.units_x.as_deref())?;
        self.write_optional_field("EINHEIT_Y", attributes.units_y.as_deref())?;
        self.write_optional_field("EINHEIT_W", attributes.units_value.as_deref())?;
        if let Some(name) = &attributes.x_mapping {
            writeln!(self.out, "*SSTX {name}")?;
        }
        if let Some(name) = &attributes.y_mapping {
            writeln!(self.out, "*SSTY {name}")?;
        }
        Ok(())
    }
}

impl Document {
    /// Renders the document with `values_per_line` array values per line.
    pub fn to_dcm_string_with(&self, values_per_line: usize) -> String {
        let mut writer = DcmWriter::new(String::new(), values_per_line);
        // Writing into a String cannot fail.
        let _ = writer.write_document(self);
        writer.into_inner()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DcmWriter::new(f, VALUES_PER_LINE).write_document(self)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DcmWriter::new(f, VALUES_PER_LINE).write_element(self)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FKT {} {} {}",
            Token(&self.name),
            Quoted(&self.version),
            Quoted(&self.description)
        )
    }
}

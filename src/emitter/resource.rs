//! Per-resource unit emission
//!
//! Each resource becomes a struct named after its identifier that owns a heap
//! buffer holding the file's exact bytes. The struct is a regular value type:
//! copies duplicate the buffer, moves transfer it and leave the source empty.

use super::{EmitOptions, GeneratedUnit, Indent, OutputFormat, SourceWriter};
use crate::encoder;

/// Render the unit embedding `bytes` as struct `identifier`.
///
/// `origin` is the resource's relative path, recorded in the banner comment.
pub fn emit_resource(
    identifier: &str,
    origin: &str,
    bytes: &[u8],
    options: &EmitOptions,
) -> GeneratedUnit {
    let mut w = SourceWriter::new();
    w.preamble(options, Some(origin));

    let root = Indent::ROOT;
    match options.format {
        OutputFormat::Module => {
            w.line(root, &format!("export module {};", identifier));
            w.blank();
            w.line(root, &format!("export namespace {}", options.namespace));
        }
        OutputFormat::Header => {
            w.line(root, "#pragma once");
            w.blank();
            w.line(root, &format!("namespace {}", options.namespace));
        }
    }
    w.line(root, "{");
    write_struct(&mut w, root.deeper(), identifier, bytes);
    w.line(root, "}");

    GeneratedUnit {
        name: identifier.to_string(),
        file_name: options.format.file_name(identifier),
        contents: w.finish(),
    }
}

fn write_struct(w: &mut SourceWriter, indent: Indent, name: &str, bytes: &[u8]) {
    let body = indent.deeper();

    w.line(indent, &format!("struct {}", name));
    w.line(indent, "{");

    write_constructor(w, body, name, bytes);
    w.blank();
    write_copy_and_move(w, body, name);
    w.blank();

    w.line(body, &format!("~{}()", name));
    w.line(body, "{");
    w.line(body.deeper(), "delete[] m_data;");
    w.line(body, "}");
    w.blank();

    w.line(body, "unsigned long long size() const");
    w.line(body, "{");
    w.line(body.deeper(), "return m_size;");
    w.line(body, "}");
    w.blank();

    w.line(body, "const unsigned char* data() const");
    w.line(body, "{");
    w.line(body.deeper(), "return m_data;");
    w.line(body, "}");
    w.blank();

    w.line(indent, "private:");
    w.line(body, "unsigned long long m_size;");
    w.line(body, "unsigned char* m_data;");
    w.line(indent, "};");
}

fn write_constructor(w: &mut SourceWriter, indent: Indent, name: &str, bytes: &[u8]) {
    let body = indent.deeper();
    let size = bytes.len();

    w.line(indent, &format!("{}()", name));
    w.line(indent, "{");
    w.line(body, &format!("m_size = {};", size));
    if bytes.is_empty() {
        w.line(body, "m_data = new unsigned char[0]{};");
    } else {
        w.line(body, &format!("m_data = new unsigned char[{}]", size));
        w.line(body, "{");
        w.raw(&encoder::encode_bytes(bytes, &body.deeper().to_string()));
        w.line(body, "};");
    }
    w.line(indent, "}");
}

fn write_copy_and_move(w: &mut SourceWriter, indent: Indent, name: &str) {
    let body = indent.deeper();
    let nested = body.deeper();

    w.line(indent, &format!("{0}(const {0}& other)", name));
    w.line(body, ": m_size(other.m_size)");
    w.line(body, ", m_data(new unsigned char[other.m_size])");
    w.line(indent, "{");
    w.line(body, "for (unsigned long long i = 0; i < m_size; ++i)");
    w.line(body, "{");
    w.line(nested, "m_data[i] = other.m_data[i];");
    w.line(body, "}");
    w.line(indent, "}");
    w.blank();

    w.line(indent, &format!("{0}({0}&& other) noexcept", name));
    w.line(body, ": m_size(other.m_size)");
    w.line(body, ", m_data(other.m_data)");
    w.line(indent, "{");
    w.line(body, "other.m_size = 0;");
    w.line(body, "other.m_data = nullptr;");
    w.line(indent, "}");
    w.blank();

    // Copy-and-swap: the by-value parameter covers both copy and move assignment
    w.line(indent, &format!("{0}& operator=({0} other) noexcept", name));
    w.line(indent, "{");
    w.line(body, "unsigned long long size = m_size;");
    w.line(body, "unsigned char* data = m_data;");
    w.line(body, "m_size = other.m_size;");
    w.line(body, "m_data = other.m_data;");
    w.line(body, "other.m_size = size;");
    w.line(body, "other.m_data = data;");
    w.line(body, "return *this;");
    w.line(indent, "}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tests::decode_literals;

    fn options(format: OutputFormat, pch: bool) -> EmitOptions {
        EmitOptions {
            namespace: "Nova".to_string(),
            pch_header: pch.then(|| "pch.h".to_string()),
            format,
        }
    }

    /// Text between the buffer's opening brace and the closing `};`
    fn literal_block(contents: &str) -> String {
        let start = contents
            .find("m_data = new unsigned char[")
            .expect("constructor allocation");
        let rest = &contents[start..];
        let open = rest.find('{').expect("initializer open brace");
        let close = rest.find('}').expect("initializer close brace");
        rest[open + 1..close].to_string()
    }

    #[test]
    fn test_emit_module_layout() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
        let unit = emit_resource(
            "textures_brick_png",
            "textures/brick.png",
            &bytes,
            &options(OutputFormat::Module, false),
        );

        assert_eq!(unit.name, "textures_brick_png");
        assert_eq!(unit.file_name, "textures_brick_png.cppm");
        assert!(unit.contents.starts_with(
            "// Generated by resembed from \"textures/brick.png\". Do not edit.\n\
             export module textures_brick_png;\n\nexport namespace Nova\n{\n\tstruct textures_brick_png\n"
        ));
        assert!(unit.contents.contains("\t\t\tm_size = 4;\n"));
        assert!(unit.contents.contains(
            "\t\t\tm_data = new unsigned char[4]\n\t\t\t{\n\t\t\t\t0xDE, 0xAD, 0xBE, 0xEF\n\t\t\t};\n"
        ));
        assert!(unit.contents.ends_with("\t};\n}\n"));
    }

    #[test]
    fn test_emit_twelve_bytes_roundtrip() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF];
        let unit = emit_resource("a", "a", &bytes, &options(OutputFormat::Module, false));

        assert!(unit.contents.contains("m_size = 12;"));
        assert_eq!(decode_literals(&literal_block(&unit.contents)), bytes);
    }

    #[test]
    fn test_emit_empty_resource() {
        let unit = emit_resource(
            "audio_click_wav",
            "audio/click.wav",
            &[],
            &options(OutputFormat::Module, false),
        );

        assert!(unit.contents.contains("\t\t\tm_size = 0;\n"));
        assert!(unit.contents.contains("\t\t\tm_data = new unsigned char[0]{};\n"));
        assert!(!unit.contents.contains("0x"));
        assert!(!unit.contents.contains(", }"));
        assert!(decode_literals(&literal_block(&unit.contents)).is_empty());
    }

    #[test]
    fn test_emit_value_semantics() {
        let unit = emit_resource("x", "x", &[1], &options(OutputFormat::Module, false));

        assert!(unit.contents.contains("\t\tx(const x& other)\n"));
        assert!(unit.contents.contains("\t\tx(x&& other) noexcept\n"));
        assert!(unit.contents.contains("\t\tx& operator=(x other) noexcept\n"));
        assert!(unit.contents.contains("\t\t~x()\n\t\t{\n\t\t\tdelete[] m_data;\n\t\t}\n"));
        assert!(unit.contents.contains("\t\tunsigned long long size() const\n"));
        assert!(unit.contents.contains("\t\tconst unsigned char* data() const\n"));
    }

    #[test]
    fn test_emit_header_format() {
        let unit = emit_resource("a_txt", "a.txt", b"hi", &options(OutputFormat::Header, false));

        assert_eq!(unit.file_name, "a_txt.h");
        assert!(unit.contents.contains("#pragma once\n\nnamespace Nova\n{\n"));
        assert!(!unit.contents.contains("export"));
    }

    #[test]
    fn test_emit_pch_line_is_first() {
        let with = emit_resource("a", "a", b"x", &options(OutputFormat::Module, true));
        let without = emit_resource("a", "a", b"x", &options(OutputFormat::Module, false));

        assert!(with.contents.starts_with("#include \"pch.h\"\n"));
        assert!(!without.contents.contains("pch.h"));
        assert_eq!(
            with.contents.strip_prefix("#include \"pch.h\"\n"),
            Some(without.contents.as_str())
        );
    }

    #[test]
    fn test_emit_is_deterministic() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let opts = options(OutputFormat::Module, true);
        assert_eq!(
            emit_resource("all", "all.bin", &bytes, &opts),
            emit_resource("all", "all.bin", &bytes, &opts)
        );
    }
}

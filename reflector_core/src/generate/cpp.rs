//! C++ source rendering for mapping artifacts.

use crate::types::EnumDeclaration;

/// Fallback returned by the generated `ToString` for values not in the table.
pub const SENTINEL: &str = "Unknown";

/// Renders the mapping artifact for `decl`.
///
/// The output depends only on `decl` and `include`, so unchanged sources
/// always produce byte-identical files.
pub fn render_mapping_source(decl: &EnumDeclaration, include: &str) -> String {
    let qualified = decl.qualified_name();
    let map_name = format!("{}ToStringMap", decl.name);

    let mut output = String::from("// Generated by reflector. Do not edit.\n");
    output.push_str("#include <unordered_map>\n");
    output.push_str("#include <string>\n");
    output.push_str(&format!("#include \"{}\"\n\n", include));

    output.push_str(&format!(
        "static const std::unordered_map<{}, std::string> {} = {{\n",
        qualified, map_name
    ));
    for enumerator in &decl.enumerators {
        output.push_str(&format!(
            "    {{ {}::{}, \"{}\" }},\n",
            qualified, enumerator, enumerator
        ));
    }
    output.push_str("};\n\n");

    output.push_str(&format!(
        "static const std::string& ToString({} value) {{\n",
        qualified
    ));
    output.push_str(&format!(
        "    static const std::string unknown = \"{}\";\n",
        SENTINEL
    ));
    output.push_str(&format!("    auto it = {}.find(value);\n", map_name));
    output.push_str(&format!("    if (it != {}.end())\n", map_name));
    output.push_str("        return it->second;\n");
    output.push_str("    return unknown;\n");
    output.push_str("}\n");

    output
}

// --- Tree-sitter Node Kind Constants ---
pub const KIND_CLASS_DECL: &str = "class_declaration";
pub const KIND_INTERFACE_DECL: &str = "interface_declaration";
pub const KIND_ENUM_DECL: &str = "enum_declaration";
pub const KIND_RECORD_DECL: &str = "record_declaration";
pub const KIND_ANNOTATION_DECL: &str = "annotation_type_declaration";

pub const KIND_METHOD_DECL: &str = "method_declaration";
pub const KIND_CONSTR_DECL: &str = "constructor_declaration";
pub const KIND_COMPACT_CONSTR_DECL: &str = "compact_constructor_declaration";
pub const KIND_ANNOTATION_ELEMENT_DECL: &str = "annotation_type_element_declaration";

pub const KIND_FIELD_DECL: &str = "field_declaration";
pub const KIND_CONSTANT_DECL: &str = "constant_declaration";
pub const KIND_ENUM_CONSTANT: &str = "enum_constant";
pub const KIND_ENUM_BODY_DECLS: &str = "enum_body_declarations";
pub const KIND_STATIC_INITIALIZER: &str = "static_initializer";
pub const KIND_BLOCK: &str = "block";

pub const KIND_MODIFIERS: &str = "modifiers";
pub const KIND_ABSTRACT: &str = "abstract";
pub const KIND_MARKER_ANNOTATION: &str = "marker_annotation";
pub const KIND_ANNOTATION: &str = "annotation";

pub const KIND_FORMAL_PARAMETER: &str = "formal_parameter";
pub const KIND_SPREAD_PARAMETER: &str = "spread_parameter";

pub const KIND_IDENTIFIER: &str = "identifier";
pub const KIND_TYPE_IDENTIFIER: &str = "type_identifier";
pub const KIND_GENERIC_TYPE: &str = "generic_type";
pub const KIND_SCOPED_TYPE_IDENTIFIER: &str = "scoped_type_identifier";
pub const KIND_SCOPED_IDENTIFIER: &str = "scoped_identifier";
pub const KIND_METHOD_INVOCATION: &str = "method_invocation";
pub const KIND_METHOD_REFERENCE: &str = "method_reference";
pub const KIND_FIELD_ACCESS: &str = "field_access";
pub const KIND_OBJECT_CREATION: &str = "object_creation_expression";
pub const KIND_CLASS_BODY: &str = "class_body";
pub const KIND_THIS: &str = "this";
pub const KIND_SUPER: &str = "super";
pub const KIND_LOCAL_VAR_DECL: &str = "local_variable_declaration";
pub const KIND_LAMBDA: &str = "lambda_expression";
pub const KIND_INFERRED_PARAMETERS: &str = "inferred_parameters";
pub const KIND_FORMAL_PARAMETERS: &str = "formal_parameters";
pub const KIND_ENHANCED_FOR: &str = "enhanced_for_statement";
pub const KIND_CATCH_CLAUSE: &str = "catch_clause";
pub const KIND_CATCH_FORMAL_PARAMETER: &str = "catch_formal_parameter";
pub const KIND_TRY_WITH_RESOURCES: &str = "try_with_resources_statement";
pub const KIND_RESOURCE: &str = "resource";
pub const KIND_VARIABLE_DECLARATOR: &str = "variable_declarator";
pub const KIND_EXTENDS_INTERFACES: &str = "extends_interfaces";
pub const KIND_LINE_COMMENT: &str = "line_comment";
pub const KIND_BLOCK_COMMENT: &str = "block_comment";

// --- Field Names ---
pub const FIELD_NAME: &str = "name";
pub const FIELD_BODY: &str = "body";
pub const FIELD_PARAMETERS: &str = "parameters";
pub const FIELD_DECLARATOR: &str = "declarator";
pub const FIELD_OBJECT: &str = "object";
pub const FIELD_ARGUMENTS: &str = "arguments";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_SUPERCLASS: &str = "superclass";
pub const FIELD_INTERFACES: &str = "interfaces";
pub const FIELD_FIELD: &str = "field";
pub const FIELD_RESOURCES: &str = "resources";

/// Declared type of a local inferred from its initializer.
pub const INFERRED_TYPE: &str = "var";

/// Annotation marking tool-generated members (`javax.annotation.Generated`,
/// `jakarta.annotation.Generated`, Lombok's `lombok.Generated`).
pub const GENERATED_ANNOTATION: &str = "Generated";

pub const JAVA_EXTENSION: &str = "java";

pub fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        KIND_CLASS_DECL
            | KIND_INTERFACE_DECL
            | KIND_ENUM_DECL
            | KIND_RECORD_DECL
            | KIND_ANNOTATION_DECL
    )
}

pub fn is_method_declaration(kind: &str) -> bool {
    matches!(
        kind,
        KIND_METHOD_DECL
            | KIND_CONSTR_DECL
            | KIND_COMPACT_CONSTR_DECL
            | KIND_ANNOTATION_ELEMENT_DECL
    )
}

pub fn is_comment(kind: &str) -> bool {
    matches!(kind, KIND_LINE_COMMENT | KIND_BLOCK_COMMENT)
}

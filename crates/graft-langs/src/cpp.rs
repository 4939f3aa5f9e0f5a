//! C++ as an extension of the C grammar.
//!
//! Rules that take the C definition as input are written with `extend`; every
//! other rule is `define`d, replacing the C rule of the same name if there is one.
//! Optional children that consumers look up by field use placeholder fields, so
//! e.g. every `if_clause` carries `modifier_list`, empty or not.

use graft_compiler::dsl::*;
use graft_compiler::{
    Associativity, Extension, Rule, choice, optional_field, reserved_field, seq,
};

use crate::scanner::RawStringRecognizer;

pub fn extension() -> Extension {
    let ext = Extension::new("cpp")
        .precedence("LAMBDA", 18, None)
        .precedence_relative("NEW", "CALL", 1)
        .precedence("STRUCTURED_BINDING", -1, Some(Associativity::Dynamic))
        .external_with("raw_string_literal", RawStringRecognizer)
        .inline("_namespace_identifier");

    let ext = conflicts(ext);
    let ext = types(ext);
    let ext = classes(ext);
    let ext = declarations(ext);
    let ext = declarators(ext);
    let ext = templates(ext);
    let ext = statements(ext);
    expressions(ext)
}

fn conflicts(ext: Extension) -> Extension {
    ext.conflict(["template_function", "template_type"])
        .conflict(["template_function", "template_type", "_expression"])
        .conflict(["template_function", "_expression"])
        .conflict(["template_method", "template_type", "field_expression"])
        .conflict(["scoped_type_identifier", "scoped_identifier"])
        .conflict(["scoped_type_identifier", "scoped_field_identifier"])
        .conflict(["comma_expression", "initializer_list"])
        .conflict(["_expression", "_declarator"])
        .conflict(["_expression", "structured_binding_declarator"])
        .conflict(["_expression", "_declarator", "_type_specifier"])
        .conflict(["parameter_list_block", "argument_list_block"])
        .conflict(["_type_specifier", "call"])
        .conflict([
            "declaration_specifier",
            "operator_cast_declaration",
            "operator_cast_definition",
            "constructor_or_destructor_definition",
        ])
        .conflict(["declaration_specifier", "constructor_specifiers"])
        .conflict(["class_specifier_name", "class_specifier_optional_name"])
}

fn types(ext: Extension) -> Extension {
    ext.extend("top_level_item", |original| {
        field(
            "statement",
            choice![
                original,
                sym("namespace"),
                sym("using_declaration"),
                sym("alias_declaration"),
                sym("static_assert_declaration"),
                sym("template_declaration"),
                sym("template_instantiation"),
                sym("constructor_or_destructor_definition"),
                sym("operator_cast_definition"),
                sym("operator_cast_declaration"),
            ],
        )
    })
    .define("decltype", seq!["decltype", "(", sym("_expression"), ")"])
    .define(
        "_type_specifier",
        choice![
            sym("struct_specifier"),
            sym("union_specifier"),
            sym("enum"),
            sym("class_specifier"),
            sym("sized_type_specifier"),
            sym("primitive_type"),
            sym("template_type"),
            sym("auto"),
            sym("dependent_type"),
            sym("decltype"),
            prec_right(
                0,
                choice![sym("scoped_type_identifier"), sym("_type_identifier")]
            ),
        ],
    )
    .extend("type_qualifier", |original| {
        field("modifier", choice![original, "mutable", "constexpr"])
    })
    .define(
        "enum",
        prec_left(
            0,
            seq![
                "enum",
                optional(choice!["class", "struct"]),
                choice![
                    seq![
                        field("name", sym("_class_name")),
                        optional(sym("_enum_base_clause")),
                        optional(field("brace_enclosed_body", sym("enumerator_list"))),
                    ],
                    field("brace_enclosed_body", sym("enumerator_list")),
                ],
            ],
        ),
    )
    .define(
        "_enum_base_clause",
        prec_left(
            0,
            seq![
                ":",
                field(
                    "base",
                    choice![
                        sym("scoped_type_identifier"),
                        sym("_type_identifier"),
                        sym("sized_type_specifier"),
                    ],
                ),
            ],
        ),
    )
    // `auto` is a type, no longer a storage class.
    .define(
        "storage_class_specifier",
        field("modifier", choice!["extern", "static", "register", "inline"]),
    )
    .define("auto", "auto")
    .define(
        "dependent_type",
        prec_dynamic(-1, seq!["typename", sym("_type_specifier")]),
    )
}

/// `class`, `struct` and `union` share one body shape. A named specifier without
/// a body keeps reserved slots for the fields a body-carrying one has.
fn classes(ext: Extension) -> Extension {
    ext.define(
        "class_specifier_name",
        seq![
            sym("_class_name"),
            reserved_field("modifier_list"),
            reserved_field("extends_list_optional"),
        ],
    )
    .define(
        "class_specifier_optional_name",
        seq![
            optional(sym("_class_name")),
            optional_field("modifier_list", sym("virtual_specifier")),
            optional_field("extends_list_optional", sym("base_class_clause")),
            field("brace_enclosed_body", sym("field_declaration_list")),
        ],
    )
    .define("class_specifier", class_like("class"))
    .define("union_specifier", class_like("union"))
    .define("struct_specifier", class_like("struct"))
    .define(
        "_class_name",
        prec_right(
            0,
            choice![
                sym("_type_identifier"),
                sym("scoped_type_identifier"),
                sym("template_type"),
            ],
        ),
    )
    .define(
        "virtual_specifier",
        field("modifier", choice!["final", "override"]),
    )
    .define("virtual_function_specifier", field("modifier", choice!["virtual"]))
    .define(
        "explicit_function_specifier",
        choice![
            "explicit",
            prec_level("CALL", seq!["explicit", "(", sym("_expression"), ")"]),
        ],
    )
    .define(
        "base_class_clause",
        seq![":", field("extends_list", comma_sep1(sym("extends_type")))],
    )
    .define(
        "extends_type",
        seq![
            optional(choice!["public", "private", "protected"]),
            sym("_class_name"),
            optional("..."),
        ],
    )
    .extend("_field_declaration_list_item", |original| {
        choice![
            original,
            sym("template_declaration"),
            sym("inline_method_definition"),
            sym("constructor_or_destructor_definition"),
            sym("constructor_or_destructor_declaration"),
            sym("operator_cast_definition"),
            sym("operator_cast_declaration"),
            sym("friend_declaration"),
            sym("access_specifier"),
            sym("alias_declaration"),
            sym("using_declaration"),
            sym("type_definition"),
            sym("static_assert_declaration"),
        ]
    })
    .define(
        "property",
        seq![
            repeat(sym("attribute")),
            optional(sym("virtual_function_specifier")),
            sym("declaration_specifiers"),
            optional_field("assignment_list", sym("property_assignment_list")),
            ";",
        ],
    )
    .define(
        "property_assignment_list",
        comma_sep1(field("assignment", sym("property_assignment"))),
    )
    .define(
        "property_assignment",
        seq![
            field("assignment_variable", sym("field_declarator")),
            optional_field(
                "assignment_value_list_optional",
                alias_sym(sym("property_assignment_value"), "assignment_value"),
            ),
        ],
    )
    .define(
        "property_assignment_value",
        choice![
            sym("bitfield_clause"),
            field("default_value", sym("initializer_list")),
            seq![
                "=",
                field(
                    "default_value",
                    choice![sym("_expression"), sym("initializer_list")],
                ),
            ],
        ],
    )
    .define(
        "inline_method_definition",
        seq![
            repeat(sym("attribute")),
            optional(sym("virtual_function_specifier")),
            sym("declaration_specifiers"),
            field("declarator", sym("field_declarator")),
            method_body(),
        ],
    )
    .define(
        "constructor_specifiers",
        repeat1(prec_right(
            0,
            choice![
                sym("storage_class_specifier"),
                sym("type_qualifier"),
                sym("attribute_specifier"),
                sym("virtual_function_specifier"),
                sym("explicit_function_specifier"),
            ],
        )),
    )
    .define(
        "operator_cast_definition",
        seq![
            optional_field("modifier_list", sym("constructor_specifiers")),
            field("declarator", sym("operator_cast")),
            method_body(),
        ],
    )
    .define(
        "operator_cast_declaration",
        prec(
            1,
            seq![
                optional_field("modifier_list", sym("constructor_specifiers")),
                field("declarator", sym("operator_cast")),
                choice![
                    seq!["=", field("default_value", sym("_expression"))],
                    field("default_value", blank()),
                ],
                ";",
            ],
        ),
    )
    .define(
        "constructor_or_destructor_definition",
        seq![
            optional_field("modifier_list", sym("constructor_specifiers")),
            field("declarator", sym("function_declarator")),
            optional(sym("field_initializer_list")),
            method_body(),
        ],
    )
    .define(
        "constructor_or_destructor_declaration",
        seq![
            optional_field("modifier_list", sym("constructor_specifiers")),
            field("declarator", sym("function_declarator")),
            ";",
        ],
    )
    .define("default_method_clause", seq!["=", "default", ";"])
    .define("delete_method_clause", seq!["=", "delete", ";"])
    .define(
        "friend_declaration",
        seq![
            "friend",
            choice![
                sym("declaration"),
                sym("function_definition"),
                seq![
                    optional(choice!["class", "struct", "union"]),
                    sym("_class_name"),
                    ";",
                ],
            ],
        ],
    )
    .define(
        "access_specifier",
        seq![choice!["public", "private", "protected"], ":"],
    )
    .define(
        "field_initializer_list",
        seq![":", comma_sep1(sym("field_initializer"))],
    )
    .define(
        "field_initializer",
        prec(
            1,
            seq![
                choice![sym("_field_identifier"), sym("scoped_field_identifier")],
                choice![sym("initializer_list"), sym("argument_list_block")],
                optional("..."),
            ],
        ),
    )
}

fn class_like(keyword: &str) -> Rule {
    prec_right(
        0,
        seq![
            keyword,
            optional(sym("ms_declspec_modifier")),
            choice![
                sym("class_specifier_name"),
                sym("class_specifier_optional_name"),
            ],
        ],
    )
}

/// `= default;` and `= delete;` leave `body` empty.
fn method_body() -> Rule {
    choice![
        field("body", sym("brace_enclosed_body")),
        seq![field("body", blank()), sym("default_method_clause")],
        seq![field("body", blank()), sym("delete_method_clause")],
    ]
}

fn declarations(ext: Extension) -> Extension {
    ext.extend("function_definition", with_attributes)
        .extend("declaration_without_semicolon", with_attributes)
        .extend("parameter_declaration", with_attributes)
        .define(
            "parameter_list",
            comma_sep1(field(
                "parameter",
                choice![
                    sym("parameter_declaration"),
                    sym("optional_parameter_declaration"),
                    sym("variadic_parameter_declaration"),
                    "...",
                ],
            )),
        )
        .define(
            "optional_parameter_declaration",
            seq![
                sym("declaration_specifiers"),
                field("declarator", optional(sym("_declarator"))),
                "=",
                field("default_value", sym("_expression")),
            ],
        )
        .define(
            "variadic_parameter_declaration",
            seq![
                sym("declaration_specifiers"),
                field(
                    "declarator",
                    choice![
                        sym("variadic_declarator"),
                        alias_sym(sym("variadic_reference_declarator"), "reference_declarator"),
                    ],
                ),
            ],
        )
        .define(
            "variadic_declarator",
            seq!["...", optional(sym("identifier"))],
        )
        .define(
            "variadic_reference_declarator",
            seq![choice!["&&", "&"], sym("variadic_declarator")],
        )
        .define(
            "list_declarator",
            seq![
                field("assignment_variable", sym("_declarator")),
                field(
                    "assignment_value",
                    choice![sym("argument_list_block"), sym("initializer_list")],
                ),
            ],
        )
        .extend("init_declarator", |original| {
            choice![original, sym("list_declarator")]
        })
        .define(
            "operator_cast",
            prec(
                1,
                seq![
                    optional(seq![
                        field("namespace", optional(namespace_prefix())),
                        "::",
                    ]),
                    "operator",
                    sym("declaration_specifiers"),
                    field("declarator", sym("_abstract_declarator")),
                ],
            ),
        )
        // `A b {};` is a declaration with an initializer list, not a body.
        .extend("brace_enclosed_body", |original| prec(-1, original))
        .define(
            "namespace",
            seq![
                "namespace",
                field("name", optional(sym("identifier"))),
                field("brace_enclosed_body", sym("declaration_list")),
            ],
        )
        .define(
            "using_declaration",
            seq![
                "using",
                optional("namespace"),
                choice![sym("identifier"), sym("scoped_identifier")],
                ";",
            ],
        )
        .define(
            "alias_declaration",
            seq![
                "using",
                field("name", sym("_type_identifier")),
                "=",
                field("type", sym("type_descriptor")),
                ";",
            ],
        )
        .define(
            "static_assert_declaration",
            seq![
                "static_assert",
                "(",
                field("condition", sym("_expression")),
                optional(seq![
                    ",",
                    field(
                        "message",
                        choice![
                            sym("string_literal"),
                            sym("raw_string_literal"),
                            sym("concatenated_string"),
                        ],
                    ),
                ]),
                ")",
                ";",
            ],
        )
        .define(
            "attribute",
            seq!["[[", comma_sep1(sym("_expression")), "]]"],
        )
}

fn with_attributes(original: Rule) -> Rule {
    seq![repeat(sym("attribute")), original]
}

fn namespace_prefix() -> Rule {
    choice![
        sym("_namespace_identifier"),
        sym("template_type"),
        sym("scoped_namespace_identifier"),
    ]
}

fn declarators(ext: Extension) -> Extension {
    ext.extend("_declarator", |original| {
        choice![
            original,
            sym("reference_declarator"),
            sym("scoped_identifier"),
            sym("template_function"),
            sym("operator_name"),
            sym("destructor_name"),
            sym("structured_binding_declarator"),
        ]
    })
    .extend("field_declarator", |original| {
        choice![
            original,
            sym("reference_field_declarator"),
            sym("template_method"),
            sym("operator_name"),
        ]
    })
    .extend("_abstract_declarator", |original| {
        choice![original, sym("abstract_reference_declarator")]
    })
    .define(
        "reference_declarator",
        prec_dynamic(1, prec_right(0, seq![choice!["&", "&&"], sym("_declarator")])),
    )
    .define(
        "reference_field_declarator",
        prec_dynamic(
            1,
            prec_right(0, seq![choice!["&", "&&"], sym("field_declarator")]),
        ),
    )
    .define(
        "abstract_reference_declarator",
        prec_right(
            0,
            seq![choice!["&", "&&"], optional(sym("_abstract_declarator"))],
        ),
    )
    .define(
        "structured_binding_declarator",
        prec_dynamic_level(
            "STRUCTURED_BINDING",
            seq!["[", comma_sep1(sym("identifier")), "]"],
        ),
    )
    .extend("function_declarator", |original| {
        prec_dynamic(1, function_modifiers(original, true))
    })
    .extend("function_field_declarator", |original| {
        prec_dynamic(1, function_modifiers(original, true))
    })
    .extend("abstract_function_declarator", |original| {
        prec_right(0, function_modifiers(original, false))
    })
    .define(
        "trailing_return_type",
        prec_right(
            0,
            seq![
                "->",
                optional(sym("type_qualifier")),
                sym("_type_specifier"),
                optional(sym("_abstract_declarator")),
            ],
        ),
    )
    .define(
        "noexcept",
        prec_right(
            0,
            field(
                "modifier",
                seq![
                    "noexcept",
                    optional(seq!["(", optional(sym("_expression")), ")"]),
                ],
            ),
        ),
    )
    .define(
        "throw_specifier",
        seq!["throw", seq!["(", comma_sep(sym("type_descriptor")), ")"]],
    )
}

/// The declarator followed by its modifiers and an optional trailing return type.
fn function_modifiers(original: Rule, virtual_specifier: bool) -> Rule {
    let mut modifiers = vec![sym("type_qualifier")];
    if virtual_specifier {
        modifiers.push(sym("virtual_specifier"));
    }
    modifiers.extend([sym("noexcept"), sym("throw_specifier")]);

    seq![
        original,
        optional_field("function_modifier_list", repeat(choice(modifiers))),
        optional_field("return_type_optional", sym("trailing_return_type")),
    ]
}

fn templates(ext: Extension) -> Extension {
    ext.define(
        "template_declaration",
        seq![
            "template",
            field("parameters", sym("template_parameter_list")),
            choice![
                sym("empty_declaration"),
                sym("alias_declaration"),
                sym("declaration"),
                sym("template_declaration"),
                sym("function_definition"),
                sym("constructor_or_destructor_declaration"),
                sym("constructor_or_destructor_definition"),
                sym("operator_cast_declaration"),
                sym("operator_cast_definition"),
            ],
        ],
    )
    .define(
        "template_instantiation",
        seq![
            "template",
            optional(sym("declaration_specifiers")),
            field("declarator", sym("_declarator")),
            ";",
        ],
    )
    .define(
        "template_parameter_list",
        seq![
            "<",
            comma_sep(choice![
                sym("parameter_declaration"),
                sym("optional_parameter_declaration"),
                sym("type_parameter_declaration"),
                sym("variadic_parameter_declaration"),
                sym("variadic_type_parameter_declaration"),
                sym("optional_type_parameter_declaration"),
                sym("template_template_parameter_declaration"),
            ]),
            closing_angle(),
        ],
    )
    .define(
        "type_parameter_declaration",
        prec(
            1,
            seq![
                choice!["typename", "class"],
                optional(sym("_type_identifier")),
            ],
        ),
    )
    .define(
        "variadic_type_parameter_declaration",
        prec(
            1,
            seq![
                choice!["typename", "class"],
                "...",
                optional(sym("_type_identifier")),
            ],
        ),
    )
    .define(
        "optional_type_parameter_declaration",
        seq![
            choice!["typename", "class"],
            optional(field("name", sym("_type_identifier"))),
            "=",
            field("default_type", sym("_type_specifier")),
        ],
    )
    .define(
        "template_template_parameter_declaration",
        seq![
            "template",
            field("parameters", sym("template_parameter_list")),
            choice![
                sym("type_parameter_declaration"),
                sym("variadic_type_parameter_declaration"),
                sym("optional_type_parameter_declaration"),
            ],
        ],
    )
    .define(
        "template_type",
        template_application(choice![
            sym("_type_identifier"),
            sym("scoped_type_identifier")
        ]),
    )
    .define(
        "template_method",
        template_application(choice![
            sym("_field_identifier"),
            sym("scoped_field_identifier")
        ]),
    )
    .define(
        "template_function",
        template_application(choice![sym("identifier"), sym("scoped_identifier")]),
    )
    .define(
        "template_argument_list",
        seq![
            "<",
            comma_sep(choice![
                prec_dynamic(3, sym("type_descriptor")),
                prec_dynamic(
                    2,
                    alias_sym(
                        sym("type_parameter_pack_expansion"),
                        "parameter_pack_expansion",
                    ),
                ),
                prec_dynamic(1, sym("_expression")),
            ]),
            closing_angle(),
        ],
    )
}

fn template_application(name: Rule) -> Rule {
    seq![
        field("name", name),
        field("arguments", sym("template_argument_list")),
    ]
}

/// `>` closing a template list wins over the comparison operator.
fn closing_angle() -> Rule {
    alias_lit(token(prec(1, ">")), ">")
}

fn statements(ext: Extension) -> Extension {
    ext.extend("statement", |original| {
        choice![original, sym("try"), sym("throw")]
    })
    .define(
        "if_clause",
        prec_dynamic(
            0,
            seq![
                "if",
                optional_field("modifier_list", "constexpr"),
                "(",
                sym("condition"),
                ")",
                sym("statement"),
            ],
        ),
    )
    .define(
        "condition",
        choice![
            seq![
                field(
                    "initializer",
                    optional(choice![sym("declaration"), sym("expression_statement")]),
                ),
                field(
                    "value",
                    choice![sym("_expression"), sym("comma_expression")],
                ),
            ],
            field("value", sym("condition_declaration")),
        ],
    )
    .define(
        "condition_declaration",
        seq![
            sym("declaration_specifiers"),
            field("declarator", sym("_declarator")),
            choice![
                seq!["=", field("value", sym("_expression"))],
                field("value", sym("initializer_list")),
            ],
        ],
    )
    .extend("for", |original| choice![original, sym("for_each_clause")])
    .define(
        "for_each_clause",
        seq![
            "for",
            "(",
            field(
                "block_iterator",
                seq![sym("declaration_specifiers"), sym("_declarator")],
            ),
            ":",
            field(
                "block_collection",
                choice![sym("_expression"), sym("initializer_list")],
            ),
            ")",
            field("body", sym("statement")),
        ],
    )
    .extend("return_value", |original| {
        choice![original, sym("initializer_list")]
    })
    .define("throw", seq!["throw", optional(sym("_expression")), ";"])
    .define(
        "try",
        seq![
            sym("try_clause"),
            field("catch_list", repeat1(sym("catch"))),
            reserved_field("finally_clause_optional"),
        ],
    )
    .define("try_clause", seq!["try", sym("brace_enclosed_body")])
    .define(
        "catch_parameter_block",
        seq![
            "(",
            alias_sym(sym("parameter_list"), "catch_parameter"),
            ")",
        ],
    )
    .define(
        "catch",
        seq![
            "catch",
            field("catch_parameter_optional", sym("catch_parameter_block")),
            sym("brace_enclosed_body"),
        ],
    )
}

fn expressions(ext: Extension) -> Extension {
    ext.extend("_expression", |original| {
        choice![
            original,
            sym("template_function"),
            sym("scoped_identifier"),
            sym("new_expression"),
            sym("delete_expression"),
            sym("lambda"),
            sym("parameter_pack_expansion"),
            sym("nullptr"),
            sym("this"),
            sym("raw_string_literal"),
        ]
    })
    // Functional casts such as `int(x)`.
    .extend("call", |original| {
        choice![
            original,
            seq![
                field("function__", sym("primitive_type")),
                field("arguments", sym("argument_list_block")),
            ],
        ]
    })
    .define(
        "new_expression",
        prec_right_level(
            "NEW",
            seq![
                optional("::"),
                "new",
                field("placement", optional(sym("argument_list_block"))),
                field("type", sym("_type_specifier")),
                field("declarator", optional(sym("new_declarator"))),
                field(
                    "arguments",
                    optional(choice![sym("argument_list_block"), sym("initializer_list")]),
                ),
            ],
        ),
    )
    .define(
        "new_declarator",
        prec_right(
            0,
            seq![
                "[",
                field("length", sym("_expression")),
                "]",
                optional(sym("new_declarator")),
            ],
        ),
    )
    .define(
        "delete_expression",
        seq![
            optional("::"),
            "delete",
            optional(seq!["[", "]"]),
            sym("_expression"),
        ],
    )
    .extend("field_expression", |original| {
        choice![
            original,
            seq![
                prec_level(
                    "FIELD",
                    seq![field("argument", sym("_expression")), choice![".", "->"]],
                ),
                field(
                    "field",
                    choice![sym("destructor_name"), sym("template_method")],
                ),
            ],
        ]
    })
    .define(
        "lambda",
        seq![
            field("captures", sym("lambda_capture_specifier")),
            optional(field("declarator", sym("abstract_function_declarator"))),
            field("body", sym("brace_enclosed_body")),
        ],
    )
    .define(
        "lambda_capture_specifier",
        prec_level(
            "LAMBDA",
            seq![
                "[",
                choice![
                    sym("lambda_default_capture"),
                    comma_sep(sym("_expression")),
                    seq![
                        sym("lambda_default_capture"),
                        ",",
                        comma_sep1(sym("_expression")),
                    ],
                ],
                "]",
            ],
        ),
    )
    .define("lambda_default_capture", choice!["=", "&"])
    .define(
        "parameter_pack_expansion",
        prec(-1, seq![field("pattern", sym("_expression")), "..."]),
    )
    .define(
        "type_parameter_pack_expansion",
        seq![field("pattern", sym("type_descriptor")), "..."],
    )
    .extend("sizeof_expression", |original| {
        choice![
            original,
            seq!["sizeof", "...", "(", field("value", sym("identifier")), ")"],
        ]
    })
    .define(
        "argument",
        choice![sym("_expression"), sym("initializer_list")],
    )
    .define(
        "destructor_name",
        prec(1, field("identifier", seq!["~", sym("identifier")])),
    )
    .extend("compound_literal_expression", |original| {
        choice![
            original,
            seq![
                field(
                    "type",
                    choice![
                        sym("_type_identifier"),
                        sym("template_type"),
                        sym("scoped_type_identifier"),
                    ],
                ),
                field("value", sym("initializer_list")),
            ],
        ]
    })
    .define(
        "scoped_field_identifier",
        scoped(
            1,
            "identifer",
            choice![
                sym("_field_identifier"),
                sym("operator_name"),
                sym("destructor_name"),
            ],
        ),
    )
    .define(
        "scoped_identifier",
        scoped(
            1,
            "identifier",
            choice![
                sym("identifier"),
                sym("operator_name"),
                sym("destructor_name"),
            ],
        ),
    )
    .define(
        "scoped_type_identifier",
        scoped(1, "identifier", sym("_type_identifier")),
    )
    .define(
        "scoped_namespace_identifier",
        scoped(2, "identifier", sym("_namespace_identifier")),
    )
    .extend("_assignment_left_expression", |original| {
        choice![original, sym("scoped_namespace_identifier")]
    })
    .define("operator_name", token(seq!["operator", choice(OPERATORS.map(Rule::from))]))
    .define("this", "this")
    .define("nullptr", "nullptr")
    .define(
        "concatenated_string",
        seq![string_piece(), repeat1(string_piece())],
    )
    .define(
        "_namespace_identifier",
        alias_sym(sym("identifier"), "namespace_identifier"),
    )
}

/// `prefix::name`, where the prefix is optional (`::name` names the global scope).
fn scoped(level: i32, field_name: &str, name: Rule) -> Rule {
    prec(
        level,
        field(field_name, seq![optional(namespace_prefix()), "::", name]),
    )
}

fn string_piece() -> Rule {
    choice![sym("raw_string_literal"), sym("string_literal")]
}

/// Operators that can be overloaded with `operator@`.
const OPERATORS: [&str; 38] = [
    "+", "-", "*", "/", "%", "^", "&", "|", "~", "!", "=", "<", ">", "+=", "-=", "*=", "/=",
    "%=", "^=", "&=", "|=", "<<", ">>", ">>=", "<<=", "==", "!=", "<=", ">=", "&&", "||", "++",
    "--", ",", "->*", "->", "()", "[]",
];

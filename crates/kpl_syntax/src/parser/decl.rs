/// Top-level units and declarations.
///
/// ## Notes
/// - Header units hold interface-level declarations (`functions` prototypes, no bodies); code units hold
///   implementations (`function` and `behavior`). Misplaced declarations get a dedicated error instead of a
///   generic "expected `endHeader`".
/// - Sections without an explicit end (`const`, `type`, `errors`, `var`, `functions`, `fields`, `methods`,
///   `messages`) continue while the next tokens have the shape of another entry.
impl<'a> Parser<'a> {
    fn unit(&mut self) -> Result<Spanned<Unit>, CompileError> {
        let start = self.current_span();
        let unit = if self.check_keyword(KeywordId::Header) {
            Unit::Header(self.header_unit()?)
        } else if self.check_keyword(KeywordId::Code) {
            Unit::Code(self.code_unit()?)
        } else if self.options.allow_bare_expressions && self.is_at_expression_start() {
            Unit::Expression(self.expression()?)
        } else {
            let mut err = self.error_expected("`header` or `code`");
            if self.is_at_expression_start() {
                err = err.with_hint("bare top-level expressions are only accepted with `ParseOptions::with_bare_expressions(true)`");
            }
            return Err(err);
        };
        Ok(Spanned::new(unit, self.span_from(start)))
    }

    /// `header <name> [uses ...] <declarations> endHeader`
    fn header_unit(&mut self) -> Result<HeaderUnit, CompileError> {
        self.open_block(KeywordId::Header)?;
        let name = self.identifier("header name")?;
        let uses = if self.check_keyword(KeywordId::Uses) {
            Some(self.uses_clause()?)
        } else {
            None
        };

        let mut declarations = Vec::new();
        loop {
            if self.check_keyword(KeywordId::Function) {
                return Err(self
                    .error_here("function bodies are not allowed in a header")
                    .with_hint("declare the prototype in a `functions` section and implement it in the code unit"));
            }
            if self.check_keyword(KeywordId::Behavior) {
                return Err(self
                    .error_here("`behavior` blocks are not allowed in a header")
                    .with_hint("move the behavior into the matching code unit"));
            }
            match self.shared_declaration()? {
                Some(decl) => declarations.push(decl),
                None if self.check_keyword(KeywordId::Functions) => declarations.push(self.functions_section()?),
                None => break,
            }
        }

        self.close_block()?;
        Ok(HeaderUnit { name, uses, declarations })
    }

    /// `code <name> <declarations> endCode`
    fn code_unit(&mut self) -> Result<CodeUnit, CompileError> {
        self.open_block(KeywordId::Code)?;
        let name = self.identifier("code unit name")?;

        let mut declarations = Vec::new();
        loop {
            if self.check_keyword(KeywordId::Functions) {
                return Err(self
                    .error_here("`functions` sections are only allowed in a header")
                    .with_hint("write the function with `function ... endFunction` instead"));
            }
            match self.shared_declaration()? {
                Some(decl) => declarations.push(decl),
                None if self.check_keyword(KeywordId::Function) => {
                    let start = self.current_span();
                    let decl = Declaration::Function(self.function_decl()?);
                    declarations.push(Spanned::new(decl, self.span_from(start)));
                }
                None if self.check_keyword(KeywordId::Behavior) => {
                    let start = self.current_span();
                    let decl = Declaration::Behavior(self.behavior_decl()?);
                    declarations.push(Spanned::new(decl, self.span_from(start)));
                }
                None => break,
            }
        }

        self.close_block()?;
        Ok(CodeUnit { name, declarations })
    }

    /// `uses P1 [renaming a to b ...], P2 ...`
    fn uses_clause(&mut self) -> Result<UsesClause, CompileError> {
        self.expect_keyword(KeywordId::Uses)?;
        let mut packages = vec![self.used_package()?];
        while self.match_punct(PunctuationId::Comma) {
            packages.push(self.used_package()?);
        }
        Ok(UsesClause { packages })
    }

    fn used_package(&mut self) -> Result<UsedPackage, CompileError> {
        let name = self.identifier("package name")?;
        let mut renamings = Vec::new();
        while self.match_keyword(KeywordId::Renaming) {
            let from = self.identifier("name to rename")?;
            self.expect_keyword(KeywordId::To)?;
            let to = self.identifier("new name")?;
            renamings.push(Renaming { from, to });
        }
        Ok(UsedPackage { name, renamings })
    }

    /// Declarations allowed in both unit kinds. Returns `None` when the next token starts none of them.
    fn shared_declaration(&mut self) -> Result<Option<Spanned<Declaration>>, CompileError> {
        let Some(keyword) = self.peek().keyword_id() else {
            return Ok(None);
        };
        let start = self.current_span();
        let decl = match keyword {
            KeywordId::Const => Declaration::Const(self.const_decl()?),
            KeywordId::Enum => Declaration::Enum(self.enum_decl()?),
            KeywordId::Type => Declaration::Type(self.type_decl()?),
            KeywordId::Errors => Declaration::Errors(self.errors_decl()?),
            KeywordId::Var => Declaration::Var(self.var_decl()?.node),
            KeywordId::Interface => Declaration::Interface(self.interface_decl()?),
            KeywordId::Class => Declaration::Class(self.class_decl()?),
            _ => return Ok(None),
        };
        Ok(Some(Spanned::new(decl, self.span_from(start))))
    }

    // ========================================================================
    // Sections
    // ========================================================================

    /// `const name = expr ...`
    fn const_decl(&mut self) -> Result<ConstDecl, CompileError> {
        self.expect_keyword(KeywordId::Const)?;
        let mut declarators = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.identifier("constant name")?;
            self.expect_op(OperatorId::Eq)?;
            let value = self.expression()?;
            declarators.push(Spanned::new(ConstDeclarator { name, value }, self.span_from(start)));
            if !self.at_binding_start() {
                break;
            }
        }
        Ok(ConstDecl { declarators })
    }

    /// `enum A, B = 5, C`
    fn enum_decl(&mut self) -> Result<EnumDecl, CompileError> {
        self.expect_keyword(KeywordId::Enum)?;
        let mut values = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.identifier("enum value name")?;
            let value = if self.match_op(OperatorId::Eq) {
                Some(self.expression()?)
            } else {
                None
            };
            values.push(Spanned::new(EnumValue { name, value }, self.span_from(start)));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(EnumDecl { values })
    }

    /// `type Name = T ...`
    fn type_decl(&mut self) -> Result<TypeDecl, CompileError> {
        self.expect_keyword(KeywordId::Type)?;
        let mut declarators = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.identifier("type name")?;
            self.expect_op(OperatorId::Eq)?;
            let ty = self.parse_type()?;
            declarators.push(Spanned::new(TypeDeclarator { name, ty }, self.span_from(start)));
            if !self.at_binding_start() {
                break;
            }
        }
        Ok(TypeDecl { declarators })
    }

    /// `errors Name(params) ...`
    fn errors_decl(&mut self) -> Result<ErrorsDecl, CompileError> {
        self.expect_keyword(KeywordId::Errors)?;
        let mut declarators = Vec::new();
        loop {
            let start = self.current_span();
            let name = self.identifier("error name")?;
            let params = self.parameter_list()?;
            declarators.push(Spanned::new(ErrorDeclarator { name, params }, self.span_from(start)));
            if !self.at_signature_start() {
                break;
            }
        }
        Ok(ErrorsDecl { declarators })
    }

    /// `var a, b: T [= expr]  c: U ...`
    fn var_decl(&mut self) -> Result<Spanned<VarDecl>, CompileError> {
        let start = self.expect_keyword(KeywordId::Var)?;
        let mut declarators = Vec::new();
        loop {
            let declarator_start = self.current_span();
            let names = self.identifier_list("variable name")?;
            self.expect_punct(PunctuationId::Colon)?;
            let ty = self.parse_type()?;
            let value = if self.match_op(OperatorId::Eq) {
                Some(self.expression()?)
            } else {
                None
            };
            declarators.push(Spanned::new(VarDeclarator { names, ty, value }, self.span_from(declarator_start)));
            if !self.at_declarator_start() {
                break;
            }
        }
        Ok(Spanned::new(VarDecl { declarators }, self.span_from(start)))
    }

    /// `functions [external] name(params) [returns T] ...`
    fn functions_section(&mut self) -> Result<Spanned<Declaration>, CompileError> {
        let start = self.expect_keyword(KeywordId::Functions)?;
        let mut prototypes = Vec::new();
        loop {
            let proto_start = self.current_span();
            let external = self.match_keyword(KeywordId::External);
            let name = self.identifier("function name")?;
            let params = self.parameter_list()?;
            let return_type = self.return_type()?;
            prototypes.push(Spanned::new(
                FunctionPrototype {
                    external,
                    name,
                    params,
                    return_type,
                },
                self.span_from(proto_start),
            ));
            if !(self.check_keyword(KeywordId::External) || self.at_signature_start()) {
                break;
            }
        }
        Ok(Spanned::new(
            Declaration::Functions(FunctionsSection { prototypes }),
            self.span_from(start),
        ))
    }

    /// `function name(params) [returns T] <body> endFunction`
    fn function_decl(&mut self) -> Result<FunctionDecl, CompileError> {
        self.open_block(KeywordId::Function)?;
        let name = self.identifier("function name")?;
        let params = self.parameter_list()?;
        let return_type = self.return_type()?;
        let body = self.body()?;
        self.close_block()?;
        Ok(FunctionDecl {
            name,
            params,
            return_type,
            body,
        })
    }

    // ========================================================================
    // Object-oriented declarations
    // ========================================================================

    /// `interface Name [type params] [extends ...] [messages ...] endInterface`
    fn interface_decl(&mut self) -> Result<InterfaceDecl, CompileError> {
        self.open_block(KeywordId::Interface)?;
        let name = self.identifier("interface name")?;
        let type_params = self.type_parameters()?;
        let extends = if self.match_keyword(KeywordId::Extends) {
            self.named_type_list()?
        } else {
            Vec::new()
        };
        let messages = if self.match_keyword(KeywordId::Messages) {
            self.method_prototypes("messages")?
        } else {
            Vec::new()
        };
        self.close_block()?;
        Ok(InterfaceDecl {
            name,
            type_params,
            extends,
            messages,
        })
    }

    /// `class Name [type params] [implements ...] [superclass T] [fields ...] [methods ...] endClass`
    fn class_decl(&mut self) -> Result<ClassDecl, CompileError> {
        self.open_block(KeywordId::Class)?;
        let name = self.identifier("class name")?;
        let type_params = self.type_parameters()?;
        let implements = if self.match_keyword(KeywordId::Implements) {
            self.named_type_list()?
        } else {
            Vec::new()
        };
        let superclass = if self.match_keyword(KeywordId::Superclass) {
            Some(self.named_type()?)
        } else {
            None
        };

        let mut fields = Vec::new();
        if self.match_keyword(KeywordId::Fields) {
            loop {
                let start = self.current_span();
                let names = self.identifier_list("field name")?;
                self.expect_punct(PunctuationId::Colon)?;
                let ty = self.parse_type()?;
                fields.push(Spanned::new(ClassField { names, ty }, self.span_from(start)));
                if !self.at_declarator_start() {
                    break;
                }
            }
        }

        let methods = if self.match_keyword(KeywordId::Methods) {
            self.method_prototypes("methods")?
        } else {
            Vec::new()
        };
        self.close_block()?;
        Ok(ClassDecl {
            name,
            type_params,
            implements,
            superclass,
            fields,
            methods,
        })
    }

    /// `behavior Name [for T] method... endBehavior`
    fn behavior_decl(&mut self) -> Result<BehaviorDecl, CompileError> {
        self.open_block(KeywordId::Behavior)?;
        let name = self.identifier("behavior name")?;
        let for_type = if self.match_keyword(KeywordId::For) {
            Some(self.named_type()?)
        } else {
            None
        };

        if !self.check_keyword(KeywordId::Method) {
            return Err(self
                .error_expected("`method`")
                .with_hint("a `behavior` must implement at least one method"));
        }
        let mut methods = Vec::new();
        while self.check_keyword(KeywordId::Method) {
            let start = self.current_span();
            let method = self.method_decl()?;
            methods.push(Spanned::new(method, self.span_from(start)));
        }

        self.close_block()?;
        Ok(BehaviorDecl {
            name,
            for_type,
            methods,
        })
    }

    /// `method <prototype> <body> endMethod`
    fn method_decl(&mut self) -> Result<MethodDecl, CompileError> {
        self.open_block(KeywordId::Method)?;
        let prototype = self.method_prototype()?;
        let body = self.body()?;
        self.close_block()?;
        Ok(MethodDecl { prototype, body })
    }

    /// One or more prototypes after `messages` / `methods`.
    fn method_prototypes(&mut self, section: &str) -> Result<Vec<Spanned<MethodPrototype>>, CompileError> {
        if !self.at_method_prototype_start() {
            return Err(self
                .error_expected("method prototype")
                .with_note(format!("a `{section}` section needs at least one prototype")));
        }
        let mut prototypes = Vec::new();
        while self.at_method_prototype_start() {
            prototypes.push(self.method_prototype()?);
        }
        Ok(prototypes)
    }

    /// One of:
    /// - `name(params) [returns T]`
    /// - `infix name(params) [returns T]`
    /// - `prefix op(params) [returns T]`
    /// - `kw1: T1 kw2: T2 ... [returns T]`
    fn method_prototype(&mut self) -> Result<Spanned<MethodPrototype>, CompileError> {
        let start = self.current_span();
        let kind = if self.match_keyword(KeywordId::Infix) {
            let name = self.identifier("infix method name")?;
            let params = self.parameter_list()?;
            MethodKind::Infix { name, params }
        } else if self.match_keyword(KeywordId::Prefix) {
            let operator = match self.peek().operator_id() {
                Some(op) if operators::is_prefix_method_name(op) => op,
                _ => {
                    return Err(self
                        .error_expected("prefix operator")
                        .with_hint("a prefix method is named by one of `!` `-` `*` `&` `~`"));
                }
            };
            self.advance();
            let params = self.parameter_list()?;
            MethodKind::Prefix { operator, params }
        } else if self.at_keyword_part() {
            let mut parts = Vec::new();
            while self.at_keyword_part() {
                let keyword = self.identifier("keyword")?;
                self.expect_punct(PunctuationId::Colon)?;
                let ty = self.parse_type()?;
                parts.push(KeywordParameter { keyword, ty });
            }
            MethodKind::Keyword { parts }
        } else {
            let name = self.identifier("method name")?;
            let params = self.parameter_list()?;
            MethodKind::Normal { name, params }
        };
        let return_type = self.return_type()?;
        Ok(Spanned::new(MethodPrototype { kind, return_type }, self.span_from(start)))
    }

    /// Optional `[name: T, ...]` after an interface or class name.
    fn type_parameters(&mut self) -> Result<Vec<TypeParameter>, CompileError> {
        let mut params = Vec::new();
        if !self.match_punct(PunctuationId::LBracket) {
            return Ok(params);
        }
        loop {
            let name = self.identifier("type parameter name")?;
            self.expect_punct(PunctuationId::Colon)?;
            let ty = self.parse_type()?;
            params.push(TypeParameter { name, ty });
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBracket)?;
        Ok(params)
    }

    fn named_type_list(&mut self) -> Result<Vec<Spanned<NamedType>>, CompileError> {
        let mut types = vec![self.named_type()?];
        while self.match_punct(PunctuationId::Comma) {
            types.push(self.named_type()?);
        }
        Ok(types)
    }
}

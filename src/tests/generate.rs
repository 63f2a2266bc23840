use pretty_assertions::assert_eq;

use crate::{
    codegen::generate,
    config::{GenerateConfig, SectionConfig},
    diagnostics::{CollectedDiagnostics, Diagnostic},
    parse::Document,
    text::Patterns,
};

const PETSTORE: &str = indoc::indoc! {"
    openapi: 3.0.0
    info:
      title: Petstore
    paths:
      /pets:
        get:
          responses:
            '200':
              content:
                application/json:
                  schema:
                    type: array
                    items:
                      $ref: '#/components/schemas/Pet'
        post:
          requestBody:
            content:
              application/json:
                schema:
                  $ref: '#/components/schemas/NewPet'
          responses:
            '201':
              content:
                application/json:
                  schema:
                    $ref: '#/components/schemas/Pet'
      /pets/{petId}:
        get:
          responses:
            '200':
              content:
                application/json:
                  schema:
                    $ref: '#/components/schemas/Pet'
            '404':
              content:
                application/json:
                  schema:
                    $ref: '#/components/schemas/Error'
        delete:
          responses:
            '204':
              description: Deleted
      /pets/{petId}/photo:
        get:
          responses:
            '200':
              content:
                image/png:
                  schema:
                    type: string
    components:
      schemas:
        Pet:
          type: object
          required: [id]
          properties:
            id:
              type: integer
            name:
              type: string
              nullable: true
        NewPet:
          type: object
          required: [name]
          properties:
            name:
              type: string
            tags:
              type: array
            status:
              type: string
              enum: [available, pending]
        Error:
          type: object
          properties:
            message:
              type: string
            details:
              type: object
              properties:
                field:
                  type: string
              additionalProperties:
                type: number
"};

fn run(doc: &str, config: &GenerateConfig) -> (Vec<String>, Vec<Diagnostic>) {
    let doc = Document::from_yaml(doc).unwrap();
    let diagnostics = CollectedDiagnostics::default();
    let declarations = generate(&doc, config, &diagnostics).unwrap();
    (declarations, diagnostics.into_inner())
}

#[test]
fn test_petstore() {
    let (declarations, diagnostics) = run(PETSTORE, &GenerateConfig::default());

    assert_eq!(
        declarations.concat(),
        indoc::indoc! {r#"
            export type Pet = {
              id: number;
              name?: Nullable<string>;
            };
            export type NewPet = {
              name: string;
              status?: "available" | "pending";
            };
            export type Error = {
              message?: string;
              details?: {
                field?: string;
              } & Record<string, number>;
            };
            export type GetPetsOkResponse = {
            };
            export type PostPetsCreatedResponse = {
              id: number;
              name?: Nullable<string>;
            };
            export type PostPetsRequestBody = {
              name: string;
              status?: "available" | "pending";
            };
            export type GetPetsByPetIdOkResponse = {
              id: number;
              name?: Nullable<string>;
            };
        "#}
    );
    assert_eq!(
        diagnostics,
        [
            Diagnostic {
                path: "NewPet.tags".to_owned(),
                message: "is an array with no items. Skipping.".to_owned(),
            },
            Diagnostic {
                path: "PostPetsRequestBody.tags".to_owned(),
                message: "is an array with no items. Skipping.".to_owned(),
            },
        ]
    );
}

#[test]
fn test_object_with_nullable_property() {
    let (declarations, _) = run(
        indoc::indoc! {"
            openapi: 3.0.0
            components:
              schemas:
                Pet:
                  type: object
                  required: [id]
                  properties:
                    id:
                      type: integer
                    name:
                      type: string
                      nullable: true
        "},
        &GenerateConfig::default(),
    );
    assert_eq!(
        declarations,
        ["export type Pet = {\n  id: number;\n  name?: Nullable<string>;\n};\n"]
    );
}

#[test]
fn test_path_declaration_name() {
    let config = GenerateConfig {
        schemas: false,
        paths: SectionConfig {
            include: Patterns::new(["/pets/*"]).unwrap(),
            ..Default::default()
        },
        ..Default::default()
    };
    let (declarations, _) = run(PETSTORE, &config);
    assert_eq!(
        declarations,
        ["export type GetPetsByPetIdOkResponse = {\n  id: number;\n  name?: Nullable<string>;\n};\n"]
    );
}

#[test]
fn test_skipped_statuses_and_media_types() {
    let config = GenerateConfig {
        schemas: false,
        ..Default::default()
    };
    let (declarations, _) = run(PETSTORE, &config);
    for declaration in &declarations {
        assert!(!declaration.contains("404"), "{declaration}");
        assert!(!declaration.contains("Delete"), "{declaration}");
        assert!(!declaration.contains("Photo"), "{declaration}");
    }
    assert_eq!(declarations.len(), 4);
}

#[test]
fn test_type_name_format() {
    let config = GenerateConfig {
        paths: SectionConfig {
            enabled: false,
            ..Default::default()
        },
        type_name_format: "Api{name}".parse().unwrap(),
        ..Default::default()
    };
    let (declarations, _) = run(PETSTORE, &config);
    let names = declarations
        .iter()
        .filter_map(|declaration| declaration.split_whitespace().nth(2))
        .collect::<Vec<_>>();
    assert_eq!(names, ["ApiPet", "ApiNewPet", "ApiError"]);
}

#[test]
fn test_nested_combinators_and_arrays() {
    let (declarations, diagnostics) = run(
        indoc::indoc! {"
            openapi: 3.1.0
            components:
              schemas:
                Shape:
                  type: object
                  properties:
                    kind:
                      oneOf:
                        - type: string
                          enum: [circle, square]
                        - type: [integer, 'null']
                    points:
                      type: array
                      items:
                        type: array
                        items:
                          type: number
                    meta:
                      allOf:
                        - type: object
                          properties:
                            a:
                              type: string
                        - type: object
                    blob:
                      type: file
        "},
        &GenerateConfig::default(),
    );
    assert_eq!(
        declarations.concat(),
        indoc::indoc! {r#"
            export type Shape = {
              kind?: ("circle" | "square" | Nullable<number>);
              points?: number[][];
              meta?: ({
                a?: string;
              } & Record<string, unknown>);
            };
        "#}
    );
    assert_eq!(
        diagnostics,
        [Diagnostic {
            path: "Shape.blob".to_owned(),
            message: "has unsupported type: file. Skipping.".to_owned(),
        }]
    );
}

#[test]
fn test_shared_refs_are_inlined() {
    let (declarations, _) = run(
        indoc::indoc! {"
            openapi: 3.0.0
            components:
              schemas:
                Id:
                  type: string
                Order:
                  type: object
                  required: [id]
                  properties:
                    id:
                      $ref: '#/components/schemas/Id'
                    parent:
                      $ref: '#/components/schemas/Id'
        "},
        &GenerateConfig::default(),
    );
    assert_eq!(
        declarations,
        [
            "export type Id = {\n};\n",
            "export type Order = {\n  id: string;\n  parent?: string;\n};\n",
        ]
    );
}

#[test]
fn test_root_properties_beside_combinator() {
    let (declarations, diagnostics) = run(
        indoc::indoc! {"
            openapi: 3.0.0
            components:
              schemas:
                Pet:
                  type: object
                  required: [id]
                  properties:
                    id:
                      type: integer
                  oneOf:
                    - $ref: '#/components/schemas/Dog'
                    - $ref: '#/components/schemas/Cat'
                Dog:
                  type: object
                  properties:
                    bark:
                      type: boolean
                Cat:
                  type: object
                  properties:
                    meow:
                      type: boolean
        "},
        &GenerateConfig::default(),
    );
    assert_eq!(
        declarations[0],
        "export type Pet = {\n  id: number;\n};\n"
    );
    assert_eq!(diagnostics, []);
}

use utoipa::openapi::path::{
    Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{
    ArrayBuilder, Components, ContentBuilder, ObjectBuilder, PathItem, PathItemType, Ref, RefOr,
    Required, ResponseBuilder, Schema, SchemaType,
};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::api;
use crate::domain::Pagination;
use crate::models::{attachment, user};
use crate::modules;

#[derive(OpenApi)]
#[openapi(
    paths(api::health::health_check),
    components(schemas(Pagination, user::Model, attachment::Model)),
    modifiers(&ModulePaths),
    tags(
        (name = "gamification", description = "Gamification API")
    )
)]
pub struct ApiDoc;

/// Component names of one module's payloads, plus the schemas behind them
pub struct ApiSchemas {
    pub create: &'static str,
    pub update: &'static str,
    pub detail: &'static str,
    pub list_item: &'static str,
    pub icon: bool,
    components: Vec<(&'static str, RefOr<Schema>)>,
}

impl ApiSchemas {
    /// `M` is the stored entity; the others are the module's request and response types.
    pub fn of<M, C, U, D, L>() -> Self
    where
        M: ToSchema<'static>,
        C: ToSchema<'static>,
        U: ToSchema<'static>,
        D: ToSchema<'static>,
        L: ToSchema<'static>,
    {
        let (create, create_schema) = C::schema();
        let (update, update_schema) = U::schema();
        let (detail, detail_schema) = D::schema();
        let (list_item, list_item_schema) = L::schema();

        Self {
            create,
            update,
            detail,
            list_item,
            icon: false,
            components: vec![
                M::schema(),
                (create, create_schema),
                (update, update_schema),
                (detail, detail_schema),
                (list_item, list_item_schema),
            ],
        }
    }

    pub fn with_icon(mut self) -> Self {
        self.icon = true;
        self
    }
}

/// Documents the CRUD (and icon) routes of every registered module.
pub struct ModulePaths;

impl Modify for ModulePaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::new);

        for module in modules::registry() {
            let tag = module.name();
            let schemas = module.api_schemas();
            let base = format!("/api/{}", tag);
            let paths = &mut openapi.paths.paths;

            paths.insert(
                base.clone(),
                PathItemBuilder::new()
                    .operation(PathItemType::Get, list_operation(tag, &schemas, true))
                    .operation(PathItemType::Post, create_operation(tag, &schemas))
                    .build(),
            );
            paths.insert(
                format!("{}/all", base),
                PathItem::new(PathItemType::Get, list_operation(tag, &schemas, false)),
            );
            paths.insert(
                format!("{}/{{id}}", base),
                PathItemBuilder::new()
                    .operation(PathItemType::Get, get_operation(tag, &schemas))
                    .operation(PathItemType::Put, update_operation(tag, &schemas))
                    .operation(PathItemType::Delete, delete_operation(tag))
                    .build(),
            );
            if schemas.icon {
                paths.insert(
                    format!("{}/{{id}}/icon", base),
                    PathItemBuilder::new()
                        .operation(PathItemType::Put, upload_icon_operation(tag, &schemas))
                        .operation(PathItemType::Delete, delete_icon_operation(tag))
                        .build(),
                );
            }

            for (name, schema) in schemas.components {
                components.schemas.insert(name.to_string(), schema);
            }
        }
    }
}

fn json(schema: impl Into<RefOr<Schema>>) -> utoipa::openapi::Content {
    ContentBuilder::new().schema(schema).build()
}

fn integer() -> ObjectBuilder {
    ObjectBuilder::new().schema_type(SchemaType::Integer)
}

fn string() -> ObjectBuilder {
    ObjectBuilder::new().schema_type(SchemaType::String)
}

fn message() -> ObjectBuilder {
    ObjectBuilder::new().property("message", string())
}

fn error_response(description: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            "application/json",
            json(ObjectBuilder::new().property("error", string())),
        )
        .build()
}

fn id_parameter() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(integer()))
        .build()
}

fn query_parameter(name: &str, description: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(integer().minimum(Some(1.0))))
        .build()
}

fn operation(tag: &str, id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .operation_id(Some(id))
        .summary(Some(summary))
}

fn list_operation(tag: &str, schemas: &ApiSchemas, paged: bool) -> Operation {
    let body = ObjectBuilder::new()
        .property("data", ArrayBuilder::new().items(Ref::from_schema_name(schemas.list_item)))
        .property("pagination", Ref::from_schema_name("Pagination"));

    let builder = if paged {
        operation(tag, format!("list_{}", tag), format!("List {} one page at a time", tag))
            .parameter(query_parameter("page", "Page number, default 1"))
            .parameter(query_parameter("limit", "Page size, default 10"))
            .response("400", error_response("Invalid page or limit"))
    } else {
        operation(tag, format!("list_all_{}", tag), format!("List every {} row", tag))
    };

    builder
        .response(
            "200",
            ResponseBuilder::new()
                .description("Paginated list")
                .content("application/json", json(body))
                .build(),
        )
        .response("500", error_response("Failed to fetch items"))
        .build()
}

fn get_operation(tag: &str, schemas: &ApiSchemas) -> Operation {
    operation(tag, format!("get_{}", tag), format!("Get one of {} by id", tag))
        .parameter(id_parameter())
        .response(
            "200",
            ResponseBuilder::new()
                .description("Item with its related records")
                .content("application/json", json(Ref::from_schema_name(schemas.detail)))
                .build(),
        )
        .response("400", error_response("Invalid id format"))
        .response("404", error_response("Item not found"))
        .build()
}

fn create_operation(tag: &str, schemas: &ApiSchemas) -> Operation {
    operation(tag, format!("create_{}", tag), format!("Create one of {}", tag))
        .request_body(Some(
            RequestBodyBuilder::new()
                .required(Some(Required::True))
                .content("application/json", json(Ref::from_schema_name(schemas.create)))
                .build(),
        ))
        .response(
            "201",
            ResponseBuilder::new()
                .description("Created")
                .content("application/json", json(Ref::from_schema_name(schemas.detail)))
                .build(),
        )
        .response("400", error_response("Malformed body"))
        .response("500", error_response("Failed to create item"))
        .build()
}

fn update_operation(tag: &str, schemas: &ApiSchemas) -> Operation {
    operation(
        tag,
        format!("update_{}", tag),
        format!("Update one of {}; missing, null or empty fields are left unchanged", tag),
    )
    .parameter(id_parameter())
    .request_body(Some(
        RequestBodyBuilder::new()
            .required(Some(Required::True))
            .content("application/json", json(Ref::from_schema_name(schemas.update)))
            .build(),
    ))
    .response(
        "200",
        ResponseBuilder::new()
            .description("Updated")
            .content("application/json", json(Ref::from_schema_name(schemas.detail)))
            .build(),
    )
    .response("400", error_response("Invalid id format or malformed body"))
    .response("404", error_response("Item not found"))
    .build()
}

fn delete_operation(tag: &str) -> Operation {
    operation(tag, format!("delete_{}", tag), format!("Soft delete one of {}", tag))
        .parameter(id_parameter())
        .response(
            "200",
            ResponseBuilder::new()
                .description("Item deleted successfully")
                .content("application/json", json(message()))
                .build(),
        )
        .response("400", error_response("Invalid id format"))
        .response("404", error_response("Item not found"))
        .build()
}

fn upload_icon_operation(tag: &str, schemas: &ApiSchemas) -> Operation {
    let form = ObjectBuilder::new()
        .property(
            "file",
            string().format(Some(utoipa::openapi::SchemaFormat::KnownFormat(
                utoipa::openapi::KnownFormat::Binary,
            ))),
        )
        .required("file");

    operation(tag, format!("upload_{}_icon", tag), format!("Replace the icon of one of {}", tag))
        .parameter(id_parameter())
        .request_body(Some(
            RequestBodyBuilder::new()
                .required(Some(Required::True))
                .content("multipart/form-data", json(form))
                .build(),
        ))
        .response(
            "200",
            ResponseBuilder::new()
                .description("Item with its new icon")
                .content("application/json", json(Ref::from_schema_name(schemas.detail)))
                .build(),
        )
        .response("400", error_response("No file uploaded, empty or oversized file"))
        .response("404", error_response("Item not found"))
        .build()
}

fn delete_icon_operation(tag: &str) -> Operation {
    operation(tag, format!("delete_{}_icon", tag), format!("Remove the icon of one of {}", tag))
        .parameter(id_parameter())
        .response(
            "200",
            ResponseBuilder::new()
                .description("File deleted successfully")
                .content("application/json", json(message()))
                .build(),
        )
        .response("404", error_response("Item not found"))
        .build()
}

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{
    JsonBody, UuidPath, UuidPathPair,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductList, ProductOption, ProductOptionList, ProductQuery};
use crate::repository::{ProductOptionRepository, ProductRepository};
use crate::service::ProductService;

pub const TAG: &str = "Products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_options,
        create_option,
        get_option,
        update_option,
        delete_option,
    ),
    components(
        schemas(Product, ProductOption, ProductList, ProductOptionList),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Products and their options")
    )
)]
pub struct ApiDoc;

type SharedService<P, O> = State<Arc<ProductService<P, O>>>;

/// Product routes, relative to where the caller nests them (usually `/products`)
pub fn router<P, O>(service: ProductService<P, O>) -> Router
where
    P: ProductRepository + 'static,
    O: ProductOptionRepository + 'static,
{
    Router::new()
        .route(
            "/",
            get(list_products::<P, O>).post(create_product::<P, O>),
        )
        .route(
            "/{id}",
            get(get_product::<P, O>)
                .put(update_product::<P, O>)
                .delete(delete_product::<P, O>),
        )
        .route(
            "/{id}/options",
            get(list_options::<P, O>).post(create_option::<P, O>),
        )
        .route(
            "/{id}/options/{option_id}",
            get(get_option::<P, O>)
                .put(update_option::<P, O>)
                .delete(delete_option::<P, O>),
        )
        .with_state(Arc::new(service))
}

/// List products, optionally filtered by name
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = ProductList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<ProductList>> {
    let items = service.list_products(query.name.as_deref()).await?;
    Ok(Json(ProductList { items }))
}

/// Create a product; `Id` is generated when omitted
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = Product,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    JsonBody(product): JsonBody<Product>,
) -> ProductResult<Json<Product>> {
    let product = service.create_product(product).await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace every field of an existing product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = Product,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPath(id): UuidPath,
    JsonBody(product): JsonBody<Product>,
) -> ProductResult<Json<Product>> {
    if product.id != id {
        return Err(ProductError::IdMismatch {
            path: id,
            body: product.id,
        });
    }

    let product = service.update_product(product).await?;
    Ok(Json(product))
}

/// Delete a product together with its options
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.delete_product(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/{id}/options",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Options of the product", body = ProductOptionList),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_options<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPath(product_id): UuidPath,
) -> ProductResult<Json<ProductOptionList>> {
    let items = service.list_options(product_id).await?;
    Ok(Json(ProductOptionList { items }))
}

/// Create an option under the product in the path
#[utoipa::path(
    post,
    path = "/{id}/options",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductOption,
    responses(
        (status = 200, description = "Option created", body = ProductOption),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPath(product_id): UuidPath,
    JsonBody(option): JsonBody<ProductOption>,
) -> ProductResult<Json<ProductOption>> {
    let option = service.create_option(product_id, option).await?;
    Ok(Json(option))
}

#[utoipa::path(
    get,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("option_id" = Uuid, Path, description = "Option id")
    ),
    responses(
        (status = 200, description = "Option found", body = ProductOption),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPathPair(_product_id, option_id): UuidPathPair,
) -> ProductResult<Json<ProductOption>> {
    let option = service.get_option(option_id).await?;
    Ok(Json(option))
}

#[utoipa::path(
    put,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("option_id" = Uuid, Path, description = "Option id")
    ),
    request_body = ProductOption,
    responses(
        (status = 200, description = "Option updated", body = ProductOption),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPathPair(product_id, option_id): UuidPathPair,
    JsonBody(option): JsonBody<ProductOption>,
) -> ProductResult<Json<ProductOption>> {
    if option.id != option_id {
        return Err(ProductError::IdMismatch {
            path: option_id,
            body: option.id,
        });
    }

    let option = service.update_option(product_id, option).await?;
    Ok(Json(option))
}

/// Delete an option; responds with the option, or `null` if there was none
#[utoipa::path(
    delete,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("option_id" = Uuid, Path, description = "Option id")
    ),
    responses(
        (status = 200, description = "Deleted option, or null", body = Option<ProductOption>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): SharedService<P, O>,
    UuidPathPair(_product_id, option_id): UuidPathPair,
) -> ProductResult<Json<Option<ProductOption>>> {
    let deleted = service.delete_option(option_id).await?;
    Ok(Json(deleted))
}

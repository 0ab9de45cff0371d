use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Parameter names are quoted so callers can bind them in named notation
// (`"Id" => $1`). Write procedures report their affected-row count.
const PROCEDURES: &[&str] = &[
    r#"
    CREATE OR REPLACE FUNCTION "getProductByName"("Name" text)
    RETURNS SETOF products AS $$
        SELECT * FROM products WHERE strpos(name, "Name") > 0
    $$ LANGUAGE sql STABLE
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "getProductById"("Id" uuid)
    RETURNS SETOF products AS $$
        SELECT * FROM products WHERE id = "Id"
    $$ LANGUAGE sql STABLE
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "insertProduct"(
        "Id" uuid, "Name" text, "Description" text, "Price" numeric, "DeliveryPrice" numeric
    )
    RETURNS integer AS $$
    DECLARE
        affected integer;
    BEGIN
        INSERT INTO products (id, name, description, price, delivery_price)
        VALUES ("Id", "Name", "Description", "Price", "DeliveryPrice");
        GET DIAGNOSTICS affected = ROW_COUNT;
        RETURN affected;
    END;
    $$ LANGUAGE plpgsql
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "updateProduct"(
        "Id" uuid, "Name" text, "Description" text, "Price" numeric, "DeliveryPrice" numeric
    )
    RETURNS integer AS $$
    DECLARE
        affected integer;
    BEGIN
        UPDATE products
        SET name = "Name",
            description = "Description",
            price = "Price",
            delivery_price = "DeliveryPrice"
        WHERE id = "Id";
        GET DIAGNOSTICS affected = ROW_COUNT;
        RETURN affected;
    END;
    $$ LANGUAGE plpgsql
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "deleteProduct"("Id" uuid)
    RETURNS integer AS $$
    DECLARE
        affected integer;
    BEGIN
        DELETE FROM products WHERE id = "Id";
        GET DIAGNOSTICS affected = ROW_COUNT;
        RETURN affected;
    END;
    $$ LANGUAGE plpgsql
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "getProductOptionByProduct"("ProductId" uuid)
    RETURNS SETOF product_options AS $$
        SELECT * FROM product_options WHERE product_id = "ProductId"
    $$ LANGUAGE sql STABLE
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "getProductOptionById"("Id" uuid)
    RETURNS SETOF product_options AS $$
        SELECT * FROM product_options WHERE id = "Id"
    $$ LANGUAGE sql STABLE
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "insertProductOption"(
        "Id" uuid, "ProductId" uuid, "Name" text, "Description" text
    )
    RETURNS integer AS $$
    DECLARE
        affected integer;
    BEGIN
        INSERT INTO product_options (id, product_id, name, description)
        VALUES ("Id", "ProductId", "Name", "Description");
        GET DIAGNOSTICS affected = ROW_COUNT;
        RETURN affected;
    END;
    $$ LANGUAGE plpgsql
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "UpdateProductOption"(
        "Id" uuid, "ProductId" uuid, "Name" text, "Description" text
    )
    RETURNS integer AS $$
    DECLARE
        affected integer;
    BEGIN
        UPDATE product_options
        SET product_id = "ProductId",
            name = "Name",
            description = "Description"
        WHERE id = "Id";
        GET DIAGNOSTICS affected = ROW_COUNT;
        RETURN affected;
    END;
    $$ LANGUAGE plpgsql
    "#,
    r#"
    CREATE OR REPLACE FUNCTION "deleteProductOption"("Id" uuid)
    RETURNS integer AS $$
    DECLARE
        affected integer;
    BEGIN
        DELETE FROM product_options WHERE id = "Id";
        GET DIAGNOSTICS affected = ROW_COUNT;
        RETURN affected;
    END;
    $$ LANGUAGE plpgsql
    "#,
];

const DROPS: &[&str] = &[
    r#"DROP FUNCTION IF EXISTS "deleteProductOption"(uuid)"#,
    r#"DROP FUNCTION IF EXISTS "UpdateProductOption"(uuid, uuid, text, text)"#,
    r#"DROP FUNCTION IF EXISTS "insertProductOption"(uuid, uuid, text, text)"#,
    r#"DROP FUNCTION IF EXISTS "getProductOptionById"(uuid)"#,
    r#"DROP FUNCTION IF EXISTS "getProductOptionByProduct"(uuid)"#,
    r#"DROP FUNCTION IF EXISTS "deleteProduct"(uuid)"#,
    r#"DROP FUNCTION IF EXISTS "updateProduct"(uuid, text, text, numeric, numeric)"#,
    r#"DROP FUNCTION IF EXISTS "insertProduct"(uuid, text, text, numeric, numeric)"#,
    r#"DROP FUNCTION IF EXISTS "getProductById"(uuid)"#,
    r#"DROP FUNCTION IF EXISTS "getProductByName"(text)"#,
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in PROCEDURES {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in DROPS {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }
}

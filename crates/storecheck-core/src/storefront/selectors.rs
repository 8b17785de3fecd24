//! Selector candidates for common storefront themes, most specific first.

pub const PASSWORD_PATH: &str = "/password";
pub const PASSWORD_INPUT: &str = r#"input[name="password"]"#;
pub const GATE_SUBMIT: &str = r#"button[type="submit"], input[type="submit"]"#;

pub const MAIN_CONTENT: &str = "main, .main-content, body";
pub const BODY: &str = "body";

/// Banner image candidates; the brand name is matched against alt and src.
pub fn banner_selector(brand: &str) -> String {
    format!(
        r#"img[alt*="{brand}"], img[src*="banner"], .banner img, .hero img, img[src*="{brand}"]"#
    )
}

pub const HOME_PRODUCTS: &[&str] = &[
    "[data-product]",
    ".product-card",
    ".product-item",
    ".product",
    ".card-product",
    "article[data-product-id]",
    ".grid-product",
    ".collection-product",
];

pub const SHOP_LINKS: &str = r#"a[href*="collections"], a[href*="products"]"#;

pub const CATALOG_PRODUCTS: &[&str] = &[
    ".product-item",
    ".card-product",
    ".product-card",
    "[data-product]",
    "article[data-product-id]",
    ".grid__item .card",
    ".collection .product",
    ".product-form",
];

pub const PRODUCT_LINKS: &str = r#"a[href*="/products/"]"#;

pub const SORT_CONTROLS: &[&str] = &[
    r#"select[name*="sort_by"]"#,
    ".sort-by select",
    "[data-sort-by] select",
    r#"select[id*="sort"]"#,
    ".facets select",
    ".collection-filters select",
];

pub const SORT_PRICE_ASCENDING: &str = "price-ascending";

pub const PRODUCT_TITLE: &str = "h1, .product__title, .product-title, [data-product-title]";
pub const PRODUCT_PRICE: &str = ".price, [data-price], .product__price, .money";
pub const PRODUCT_IMAGE: &str =
    r#".product__media img, .product-image img, img[alt*="coffee"], img[alt*="Coffee"]"#;

pub const NAV_LINKS: &str = "nav a, .header a";
pub const MENU_TOGGLE: &str = r#"[aria-controls*="drawer"], .header__icon--menu, button[aria-expanded]"#;
pub const ABOUT_PATH: &str = "/pages/about";
pub const ABOUT_LINK: &str = r#"a[href*="/pages/about"]"#;

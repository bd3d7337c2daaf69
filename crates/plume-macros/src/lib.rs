use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{self, Parse, ParseStream, Parser as _, Result};
use syn::{Expr, ItemStruct, parse_macro_input};

struct Args {
    path: Expr,
}

impl Parse for Args {
    fn parse(input: ParseStream) -> Result<Self> {
        let path = input.parse()?;

        Ok(Args { path })
    }
}

#[proc_macro_attribute]
pub fn route(attrs: TokenStream, item: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let item_struct = syn::parse_macro_input!(item as ItemStruct);
    let attrs = syn::parse_macro_input!(attrs as Args);

    let struct_name = &item_struct.ident;
    let path = &attrs.path;

    let expanded = quote! {
        impl plume::route::InternalRoute for #struct_name {
            fn route_raw(&self) -> Option<String> {
                Some(#path.to_string())
            }
        }

        impl plume::route::FullRoute for #struct_name {
            fn render_internal(&self, ctx: &mut plume::route::PageContext) -> std::result::Result<plume::route::RenderResult, Box<dyn std::error::Error>> {
                let result: plume::route::RenderResult = self.render(ctx).into();
                result.into()
            }

            fn pages_internal(&self, ctx: &mut plume::route::DynamicRouteContext) -> plume::route::PagesResults {
                self.pages(ctx)
                    .into_iter()
                    .map(|page| {
                        let raw_params: plume::route::PageParams = (&page.params).into();
                        let typed_params: Box<dyn std::any::Any + Send + Sync> = Box::new(page.params);
                        let props: Box<dyn std::any::Any + Send + Sync> = Box::new(page.props);
                        (raw_params, typed_params, props)
                    })
                    .collect()
            }
        }

        #item_struct
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(Params)]
pub fn derive_params(item: TokenStream) -> TokenStream {
    let item_struct = syn::parse_macro_input!(item as ItemStruct);
    let struct_name = &item_struct.ident;

    let fields = match &item_struct.fields {
        syn::Fields::Named(fields) => fields
            .named
            .iter()
            .map(|f| f.ident.as_ref().unwrap())
            .collect::<Vec<_>>(),
        _ => panic!("Only named fields are supported"),
    };

    // Add a conversion into the raw parameter map
    let expanded = quote! {
        impl From<#struct_name> for plume::route::PageParams {
            fn from(params: #struct_name) -> Self {
                let mut map = plume::FxHashMap::default();
                #(
                    map.insert(stringify!(#fields).to_string(), Some(params.#fields.to_string()));
                )*
                plume::route::PageParams(map)
            }
        }

        impl From<&#struct_name> for plume::route::PageParams {
            fn from(params: &#struct_name) -> Self {
                let mut map = plume::FxHashMap::default();
                #(
                    map.insert(stringify!(#fields).to_string(), Some(params.#fields.to_string()));
                )*
                plume::route::PageParams(map)
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_attribute]
// Helps implement a struct as a Markdown content entry.
//
// See complete documentation in `crates/plume/src/content.rs`.
pub fn markdown_entry(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut item_struct = syn::parse_macro_input!(item as ItemStruct);
    let _ = parse_macro_input!(args as parse::Nothing);

    let struct_name = &item_struct.ident;

    // Add __internal_headings field
    if let syn::Fields::Named(ref mut fields) = item_struct.fields {
        fields.named.push(
            syn::Field::parse_named
                .parse2(quote! {
                    #[serde(skip)]
                    __internal_headings: Vec<plume::content::MarkdownHeading>
                })
                .unwrap(),
        );
    }

    let expanded = quote! {
        #[derive(serde::Deserialize)]
        #item_struct

        impl plume::content::MarkdownContent for #struct_name {
            fn get_headings(&self) -> &Vec<plume::content::MarkdownHeading> {
                &self.__internal_headings
            }
        }

        impl plume::content::InternalMarkdownContent for #struct_name {
            fn set_headings(&mut self, headings: Vec<plume::content::MarkdownHeading>) {
                self.__internal_headings = headings;
            }
        }
    };

    TokenStream::from(expanded)
}

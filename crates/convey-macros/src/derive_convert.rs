//! Implementation of the `#[derive(Convert)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Generics, Index, Member, Type, parse_macro_input, parse_quote};

use crate::attrs::{FieldAttrs, TypeAttrs};

pub fn derive_convert_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_convert_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A struct field as seen by conversions.
struct FieldInfo<'a> {
    member: Member,
    ty: &'a Type,
    name: String,
    attrs: FieldAttrs,
}

fn derive_convert_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Convert can only be derived for structs",
        ));
    };

    let attrs = TypeAttrs::from_attrs(&input.attrs)?;
    let type_name = attrs.name.clone().unwrap_or_else(|| input.ident.to_string());
    let fields = collect_fields(&data.fields)?;

    let struct_slot = generate_struct_slot(input, &type_name, &fields);
    let zero = if attrs.no_zero {
        quote! {}
    } else {
        generate_zero(input, &data.fields, &fields)
    };
    let to_value = generate_to_value(input, &attrs, &type_name, &fields);

    Ok(quote! {
        #struct_slot
        #zero
        #to_value
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo<'_>>> {
    let mut out = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        let name = attrs.rename.clone().unwrap_or_else(|| match &member {
            Member::Named(ident) => ident.to_string(),
            Member::Unnamed(index) => index.index.to_string(),
        });
        out.push(FieldInfo {
            member,
            ty: &field.ty,
            name,
            attrs,
        });
    }
    Ok(out)
}

/// The struct's generics with `ty: bound` added for each pair.
///
/// Only generic structs get extra bounds; on a concrete struct a missing impl is reported
/// at the field instead.
fn with_bounds<'a>(
    generics: &Generics,
    bounds: impl IntoIterator<Item = (&'a Type, TokenStream2)>,
) -> Generics {
    let mut generics = generics.clone();
    if generics.type_params().next().is_some() {
        let clause = generics.make_where_clause();
        for (ty, bound) in bounds {
            clause.predicates.push(parse_quote!(#ty: #bound));
        }
    }
    generics
}

/// `StructSlot` plus `Target`.
fn generate_struct_slot(
    input: &DeriveInput,
    type_name: &str,
    fields: &[FieldInfo<'_>],
) -> TokenStream2 {
    let ident = &input.ident;
    let visible: Vec<_> = fields.iter().filter(|f| !f.attrs.skip).collect();
    let generics = with_bounds(
        &input.generics,
        visible.iter().map(|f| (f.ty, quote!(::convey_core::Target))),
    );
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let count = visible.len();
    let descriptors = visible.iter().map(|f| {
        let name = &f.name;
        if f.attrs.readonly {
            quote! { ::convey_core::Field::readonly(#name) }
        } else {
            quote! { ::convey_core::Field::new(#name) }
        }
    });
    let arms = visible.iter().enumerate().filter(|(_, f)| !f.attrs.readonly).map(|(index, f)| {
        let member = &f.member;
        quote! {
            #index => ::core::option::Option::Some(::convey_core::Target::slot(&mut self.#member)),
        }
    });

    quote! {
        impl #impl_generics ::convey_core::StructSlot for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> &'static [::convey_core::Field] {
                static FIELDS: [::convey_core::Field; #count] = [#(#descriptors),*];
                &FIELDS
            }

            fn field(&mut self, index: usize) -> ::core::option::Option<::convey_core::Slot<'_>> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::convey_core::Target for #ident #ty_generics #where_clause {
            fn slot(&mut self) -> ::convey_core::Slot<'_> {
                ::convey_core::Slot::Struct(self)
            }
        }
    }
}

/// `Zero`: visible fields take their zero value, skipped fields their `Default`.
fn generate_zero(input: &DeriveInput, shape: &Fields, fields: &[FieldInfo<'_>]) -> TokenStream2 {
    let ident = &input.ident;
    let generics = with_bounds(
        &input.generics,
        fields.iter().map(|f| {
            let bound = if f.attrs.skip {
                quote!(::core::default::Default)
            } else {
                quote!(::convey_core::Zero)
            };
            (f.ty, bound)
        }),
    );
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let values = fields.iter().map(|f| {
        if f.attrs.skip {
            quote! { ::core::default::Default::default() }
        } else {
            quote! { ::convey_core::Zero::zero() }
        }
    });
    let body = match shape {
        Fields::Named(_) => {
            let members = fields.iter().map(|f| &f.member);
            quote! { Self { #(#members: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    };

    quote! {
        impl #impl_generics ::convey_core::Zero for #ident #ty_generics #where_clause {
            fn zero() -> Self {
                #body
            }
        }
    }
}

/// `ToValue`: a struct value with every visible field, readonly ones included.
fn generate_to_value(
    input: &DeriveInput,
    attrs: &TypeAttrs,
    type_name: &str,
    fields: &[FieldInfo<'_>],
) -> TokenStream2 {
    let ident = &input.ident;
    let visible: Vec<_> = fields.iter().filter(|f| !f.attrs.skip).collect();
    let generics = with_bounds(
        &input.generics,
        visible.iter().map(|f| (f.ty, quote!(::convey_core::ToValue))),
    );
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let names = visible.iter().map(|f| &f.name);
    let members = visible.iter().map(|f| &f.member);
    let display = attrs.display.then(|| {
        quote! { .display(::std::string::ToString::to_string(self)) }
    });

    quote! {
        impl #impl_generics ::convey_core::ToValue for #ident #ty_generics #where_clause {
            fn to_value(&self) -> ::convey_core::Value {
                ::convey_core::Value::Struct(
                    ::convey_core::StructValue::new(#type_name)
                        #(.field(#names, ::convey_core::ToValue::to_value(&self.#members)))*
                        #display
                )
            }
        }
    }
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::*;

pub fn enum_de(name: &Ident, data: &DataEnum) -> TokenStream {
    let enum_string = name.to_string();

    // unit variants may also arrive as a bare name
    let unit_arms = data.variants.iter().filter_map(|variant| match variant.fields {
        Fields::Unit => {
            let m_variant = &variant.ident;
            let m_ident_string = m_variant.to_string();
            Some(quote! { #m_ident_string => Ok(#name::#m_variant), })
        }
        _ => None,
    });

    let arms = data.variants.iter().map(|variant| {
        let m_variant = &variant.ident;
        let m_ident_string = m_variant.to_string();
        let exp_len = variant.fields.iter().len();

        let constructor = match &variant.fields {
            // Unit-like variant
            Fields::Unit => quote! { #name::#m_variant },
            // Named-tuple variant
            Fields::Unnamed(fields) => {
                let takes = fields
                    .unnamed
                    .iter()
                    .map(|_| quote! { ::mpack::encoding::De::de(__d)? });
                quote! { #name::#m_variant(#(#takes),*) }
            }
            // C-style struct variant
            Fields::Named(fields) => {
                let field_names = fields.named.iter().filter_map(|field| field.ident.as_ref());
                quote! {
                    #name::#m_variant {
                        #(#field_names: ::mpack::encoding::De::de(__d)?,)*
                    }
                }
            }
        };

        quote! {
            #m_ident_string => {
                if __len - 1 != #exp_len {
                    return Err(::mpack::Error::invalid(format!(
                        "wrong arity for `{}`: expected {} fields, found {}",
                        #m_ident_string,
                        #exp_len,
                        __len - 1,
                    )));
                }
                Ok(#constructor)
            }
        }
    });

    quote! {
        match ::mpack::encoding::Decoder::peek_next(__d)? {
            ::mpack::encoding::Data::NeedMoreData(n) => Err(::mpack::Error::NeedMoreData(n)),
            ::mpack::encoding::Data::Raw(_) => {
                let __name: ::std::string::String = ::mpack::encoding::De::de(__d)?;
                match __name.as_str() {
                    #(#unit_arms)*
                    __unknown => Err(::mpack::Error::invalid(format!(
                        "`{}` is not a unit variant of `{}`",
                        __unknown,
                        #enum_string,
                    ))),
                }
            }
            _ => {
                let __len = ::mpack::encoding::Decoder::get_array(__d)?;
                if __len == 0 {
                    return Err(::mpack::Error::invalid(format!(
                        "expected a variant of `{}`, found an empty array",
                        #enum_string,
                    )));
                }

                let __name: ::std::string::String = ::mpack::encoding::De::de(__d)?;
                match __name.as_str() {
                    #(#arms)*
                    __unknown => Err(::mpack::Error::invalid(format!(
                        "`{}` is not a variant of `{}`",
                        __unknown,
                        #enum_string,
                    ))),
                }
            }
        }
    }
}

//! Account abstraction (ERC-4337) smart account contract interfaces

pub mod entry_point;
mod error;
mod gen;

pub use entry_point::EntryPoint;
pub use error::EntryPointError;
pub use gen::{
    add_modules_lib, safe, safe_4337_module, safe_proxy_factory, simple_account,
    simple_account_factory, AddModulesLib, CreateAccountCall, CreateProxyWithNonceCall,
    EnableModulesCall, ExecuteCall, ExecuteUserOpCall, Safe, Safe4337Module, SafeProxyFactory,
    SetupCall, SimpleAccount, SimpleAccountFactory,
};

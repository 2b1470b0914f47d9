//! Result code catalog. Codes follow the legacy numbering: `A` for request
//! faults, `P` for product modules, `F` for financial, `R`/`M` for the admin
//! modules, `B` for basic data.

use common::locale::Message;

use crate::crud::CrudMessages;

pub const PARAMETER_NULL: Message = Message::new(
    "A0002",
    "必要的参数为空",
    "The required parameters cannot be empty",
);
pub const QUERY_DATA_EMPTY: Message = Message::new("A0404", "查询数据为空", "No data found");

pub const CATEGORY: CrudMessages = CrudMessages {
    add_success: Message::new("P0001", "新增产品分类成功", "Product category added"),
    add_error: Message::new("P0501", "新增产品分类失败", "Failed to add product category"),
    update_success: Message::new("P0002", "修改产品分类成功", "Product category updated"),
    update_error: Message::new(
        "P0502",
        "修改产品分类失败",
        "Failed to update product category",
    ),
    delete_success: Message::new("P0003", "删除产品分类成功", "Product category deleted"),
    delete_error: Message::new(
        "P0503",
        "删除产品分类失败",
        "Failed to delete product category",
    ),
    key_exists: Message::new(
        "P0000",
        "产品分类名称已存在",
        "Product category name already exists",
    ),
};

pub const ATTRIBUTE: CrudMessages = CrudMessages {
    add_success: Message::new("P0101", "新增产品属性成功", "Product attribute added"),
    add_error: Message::new(
        "P0511",
        "新增产品属性失败",
        "Failed to add product attribute",
    ),
    update_success: Message::new("P0102", "修改产品属性成功", "Product attribute updated"),
    update_error: Message::new(
        "P0512",
        "修改产品属性失败",
        "Failed to update product attribute",
    ),
    delete_success: Message::new("P0103", "删除产品属性成功", "Product attribute deleted"),
    delete_error: Message::new(
        "P0513",
        "删除产品属性失败",
        "Failed to delete product attribute",
    ),
    key_exists: Message::new(
        "P0100",
        "产品属性名称已存在",
        "Product attribute name already exists",
    ),
};

pub const UNIT: CrudMessages = CrudMessages {
    add_success: Message::new("P0201", "新增产品单位成功", "Product unit added"),
    add_error: Message::new("P0521", "新增产品单位失败", "Failed to add product unit"),
    update_success: Message::new("P0202", "修改产品单位成功", "Product unit updated"),
    update_error: Message::new("P0522", "修改产品单位失败", "Failed to update product unit"),
    delete_success: Message::new("P0203", "删除产品单位成功", "Product unit deleted"),
    delete_error: Message::new("P0523", "删除产品单位失败", "Failed to delete product unit"),
    key_exists: Message::new("P0200", "产品单位已存在", "Product unit already exists"),
};

pub const UPDATE_UNIT_STATUS_SUCCESS: Message =
    Message::new("P0204", "修改产品单位状态成功", "Product unit status updated");
pub const UPDATE_UNIT_STATUS_ERROR: Message = Message::new(
    "P0524",
    "修改产品单位状态失败",
    "Failed to update product unit status",
);

pub const ADVANCE: CrudMessages = CrudMessages {
    add_success: Message::new("F0001", "新增收预付款成功", "Advance charge added"),
    add_error: Message::new("F0501", "新增收预付款失败", "Failed to add advance charge"),
    update_success: Message::new("F0002", "修改收预付款成功", "Advance charge updated"),
    update_error: Message::new(
        "F0502",
        "修改收预付款失败",
        "Failed to update advance charge",
    ),
    delete_success: Message::new("F0003", "删除收预付款成功", "Advance charge deleted"),
    delete_error: Message::new(
        "F0503",
        "删除收预付款失败",
        "Failed to delete advance charge",
    ),
    key_exists: Message::new("F0000", "单据编号已存在", "Receipt number already exists"),
};

pub const UPDATE_ADVANCE_STATUS_SUCCESS: Message = Message::new(
    "F0004",
    "修改收预付款状态成功",
    "Advance charge status updated",
);
pub const UPDATE_ADVANCE_STATUS_ERROR: Message = Message::new(
    "F0504",
    "修改收预付款状态失败",
    "Failed to update advance charge status",
);

pub const MEMBER: CrudMessages = CrudMessages {
    add_success: Message::new("B0001", "新增会员成功", "Member added"),
    add_error: Message::new("B0501", "新增会员失败", "Failed to add member"),
    update_success: Message::new("B0002", "修改会员信息成功", "Member updated"),
    update_error: Message::new("B0502", "修改会员信息失败", "Failed to update member"),
    delete_success: Message::new("B0003", "删除会员成功", "Member deleted"),
    delete_error: Message::new("B0503", "删除会员失败", "Failed to delete member"),
    key_exists: Message::new("B0000", "会员已存在", "Member already exists"),
};

pub const UPDATE_MEMBER_STATUS_SUCCESS: Message =
    Message::new("B0004", "修改会员状态成功", "Member status updated");
pub const UPDATE_MEMBER_STATUS_ERROR: Message =
    Message::new("B0504", "修改会员状态失败", "Failed to update member status");

pub const ROLE: CrudMessages = CrudMessages {
    add_success: Message::new("R0001", "新增角色成功", "Role added"),
    add_error: Message::new("R0501", "新增角色失败", "Failed to add role"),
    update_success: Message::new("R0002", "修改角色成功", "Role updated"),
    update_error: Message::new("R0502", "修改角色失败", "Failed to update role"),
    delete_success: Message::new("R0003", "删除角色成功", "Role deleted"),
    delete_error: Message::new("R0503", "删除角色失败", "Failed to delete role"),
    key_exists: Message::new("R0000", "角色已存在", "Role already exists"),
};

pub const UPDATE_ROLE_STATUS_SUCCESS: Message =
    Message::new("R0004", "修改角色状态成功", "Role status updated");
pub const UPDATE_ROLE_STATUS_ERROR: Message =
    Message::new("R0504", "修改角色状态失败", "Failed to update role status");
pub const ROLE_PERMISSION_SUCCESS: Message =
    Message::new("R0005", "角色赋权成功", "Role permissions assigned");
pub const ROLE_PERMISSION_ERROR: Message =
    Message::new("R0505", "角色赋权失败", "Failed to assign role permissions");

pub const MENU: CrudMessages = CrudMessages {
    add_success: Message::new("M0001", "新增菜单成功", "Menu added"),
    add_error: Message::new("M0501", "新增菜单失败", "Failed to add menu"),
    update_success: Message::new("M0002", "修改菜单成功", "Menu updated"),
    update_error: Message::new("M0502", "修改菜单失败", "Failed to update menu"),
    delete_success: Message::new("M0003", "删除菜单成功", "Menu deleted"),
    delete_error: Message::new("M0503", "删除菜单失败", "Failed to delete menu"),
    key_exists: Message::new("M0000", "菜单已存在", "Menu already exists"),
};
